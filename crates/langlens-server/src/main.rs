//! Langlens server - HTTP API for programming-language detection.

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod state;

use config::ServerArgs;
use langlens_ai::Detector;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "langlens_server=info,langlens_ai=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();
    info!("Starting Langlens server");

    // All three artifacts must load, or the process exits non-zero.
    let detector = match Detector::load(&args.models_dir) {
        Ok(detector) => detector,
        Err(err) => {
            error!(error = %err, "failed to load model artifacts");
            log_models_dir(&args.models_dir);
            return Err(err).context("model artifacts are required to start");
        }
    };
    info!(
        languages = detector.known_languages().len(),
        "model artifacts loaded"
    );

    let state = AppState::new(detector);
    let app = api::create_router(state, &args.allowed_origins);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Show what was actually on disk when loading fails, so a bad deploy is
/// diagnosable from the logs alone.
fn log_models_dir(dir: &std::path::Path) {
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            let files: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect();
            error!(dir = %dir.display(), ?files, "models directory contents");
        }
        Err(err) => {
            error!(dir = %dir.display(), error = %err, "models directory is unreadable");
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
