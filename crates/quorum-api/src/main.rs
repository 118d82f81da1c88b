//! Quorum API server entry point.

use std::sync::Arc;

use quorum_api::config::{AppConfig, LogFormat};
use quorum_api::error::AppError;
use quorum_api::state::AppState;
use quorum_core::clock::SystemClock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    tracing::info!("Starting Quorum API server");

    let app_state = AppState::in_memory(Arc::new(SystemClock));
    let app = quorum_api::build_router(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
