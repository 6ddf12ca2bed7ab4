mod handlers;
mod state;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

pub use state::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/translate", post(handlers::translate))
        .route("/hospitals", post(handlers::hospitals))
        .route("/predict", post(handlers::predict))
        .layer(cors_layer(cors_origins))
        .with_state(Arc::new(state))
}

/// Restrict to the configured origins; an empty list allows any.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn start(state: AppState, host: &str, port: u16, cors_origins: &[String]) -> anyhow::Result<()> {
    let app = build_router(state, cors_origins);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind to {}", addr))?;

    info!("medbridge listening on http://{}", addr);
    info!("endpoints: POST /translate, POST /hospitals, POST /predict");

    axum::serve(listener, app).await.context("server error")
}
