//! Dispatch Service
//!
//! HTTP server for courier dispatch: courier and order ingestion,
//! per-day assignment, completion and earnings reporting.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dispatch::config::Config;
use dispatch::di::AppState;
use dispatch::infrastructure::http::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(env = ?config.app_env, "Starting Dispatch Service...");

    // Initialize application state
    let state = Arc::new(AppState::new(&config).await.map_err(|e| {
        error!(error = %e, "Failed to initialize application state");
        e
    })?);

    let router = build_router(state);

    let addr = config.http_addr();
    info!(address = %addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c signal");
        return;
    }
    info!("Received shutdown signal");
}
