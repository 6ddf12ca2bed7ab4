use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medbridge::config::Config;
use medbridge::geo::Coordinate;
use medbridge::server::{self, AppState};
use medbridge::translate::TranslationQuery;

/// medbridge: medical phrase translation and hospital finder
///
/// Examples:
///   medbridge serve --port 5000
///   medbridge translate "I have a headache" --from en --to es
///   medbridge hospitals --lat 12.84 --lon 80.1557
///   medbridge predict headache nausea
#[derive(Parser)]
#[command(name = "medbridge", version, about, long_about = None)]
struct Cli {
    /// Config file (TOML). Defaults to ./medbridge.toml or ~/.medbridge/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Translate one phrase and print the result.
    Translate {
        text: String,
        /// Source language (ISO-639-1).
        #[arg(long, default_value = "en")]
        from: String,
        /// Target language (ISO-639-1).
        #[arg(long, default_value = "es")]
        to: String,
    },
    /// Print hospitals near a coordinate as JSON.
    Hospitals {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Predict a disease from symptom names.
    Predict {
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "medbridge=debug" } else { "medbridge=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (config, source) = Config::discover(cli.config.as_deref())?;
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    let state = AppState::from_config(&config)?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
            runtime.block_on(server::start(state, &host, port, &config.server.cors_origins))?;
        }
        Command::Translate { text, from, to } => {
            let translation = state.translator.resolve(&TranslationQuery::new(text, from, to));
            eprintln!("  source: {}", translation.source);
            println!("{}", translation.text);
        }
        Command::Hospitals { lat, lon } => {
            let origin = Coordinate::new(lat, lon)?;
            let search = state.hospitals.search_with_source(origin);
            eprintln!("  {} hospitals ({}) near {}", search.facilities.len(), search.source, origin);
            println!("{}", serde_json::to_string_pretty(&search.facilities)?);
        }
        Command::Predict { symptoms } => match state.classifier.predict(&symptoms) {
            Ok(label) => println!("{}", label),
            Err(e) => anyhow::bail!("prediction failed: {}", e),
        },
    }

    Ok(())
}
