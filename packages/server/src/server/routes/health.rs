use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    collaborators: CollaboratorHealth,
    recent_runs: usize,
}

/// Which collaborators have real credentials behind them
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorHealth {
    photo_processor: bool,
    repository: bool,
    social: bool,
    notifier: bool,
}

/// Health check endpoint
///
/// Always 200 while the process is serving. Unconfigured collaborators are
/// reported, not treated as unhealthy: their steps are skipped.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let deps = &state.deps;

    Json(HealthResponse {
        status: "healthy".to_string(),
        collaborators: CollaboratorHealth {
            photo_processor: deps.photo_processor.is_configured(),
            repository: deps.repository.is_configured(),
            social: deps.social.is_configured(),
            notifier: deps.notifier.is_configured(),
        },
        recent_runs: state.runner.history().len().await,
    })
}
