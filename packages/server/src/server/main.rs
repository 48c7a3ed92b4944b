// Main entry point for the showcase pipeline server

use std::sync::Arc;

use anyhow::{Context, Result};
use showcase_core::kernel::ServerDeps;
use showcase_core::server::{build_app, AppState};
use showcase_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,showcase_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting job showcase pipeline");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(pipeline = ?config.pipeline, "Configuration loaded");

    let deps = Arc::new(ServerDeps::from_config(&config).context("Failed to build collaborators")?);
    let port = config.port;
    let state = AppState::new(deps, config.jobber_access_token, config.pipeline);
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Jobber webhook: http://localhost:{}/webhooks/jobber", port);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
