use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::geo::{Coordinate, Facility};
use crate::translate::resolver::unavailable_message;
use crate::translate::TranslationQuery;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── POST /translate ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub src_lang: String,
    pub tgt_lang: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    let start = Instant::now();
    let query = TranslationQuery::new(req.text, req.src_lang, req.tgt_lang);

    let translator = state.translator.clone();
    let task_query = query.clone();
    let translation = match tokio::task::spawn_blocking(move || translator.resolve(&task_query)).await {
        Ok(t) => t.text,
        Err(e) => {
            error!(error = %e, "translation task panicked");
            unavailable_message(&query.text)
        }
    };

    info!(
        from = %query.source_lang,
        to = %query.target_lang,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /translate"
    );

    Json(TranslateResponse { translation })
}

// ─── POST /hospitals ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn hospitals(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<Vec<Facility>>, ApiError> {
    let start = Instant::now();

    let origin = Coordinate::new(req.latitude, req.longitude)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid coordinates: {}", e)))?;

    let resolver = state.hospitals.clone();
    let search = match tokio::task::spawn_blocking(move || resolver.search_with_source(origin)).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "hospital search task panicked");
            return Ok(Json(state.hospitals.fallback().to_vec()));
        }
    };

    info!(
        %origin,
        source = %search.source,
        count = search.facilities.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /hospitals"
    );

    Ok(Json(search.facilities))
}

// ─── POST /predict ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub prediction: String,
}

/// Failures are reported inside `prediction`, never as an HTTP error.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Json<PredictResponse> {
    let classifier = state.classifier.clone();
    let count = req.symptoms.len();

    let prediction = match tokio::task::spawn_blocking(move || classifier.predict(&req.symptoms)).await {
        Ok(Ok(label)) => label,
        Ok(Err(e)) => {
            warn!(error = %e, "prediction failed");
            format!("Error: {}", e)
        }
        Err(e) => {
            error!(error = %e, "prediction task panicked");
            format!("Error: {}", e)
        }
    };

    info!(symptoms = count, %prediction, "POST /predict");
    Json(PredictResponse { prediction })
}
