//! Manual pipeline trigger and run inspection.
//!
//! POST /pipeline/run   { "jobId"?: string, "visitId"?: string }
//! GET  /pipeline/runs?limit=N

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::jobs::JobReference;
use crate::domains::pipeline::RunRecord;
use crate::server::app::AppState;

const DEFAULT_RUNS_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub job_id: Option<String>,
    pub visit_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Run the pipeline synchronously and return its record.
///
/// A request without any id is rejected before a run is started.
pub async fn run_pipeline_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunRecord>, (StatusCode, Json<ErrorResponse>)> {
    let job_ref = JobReference::from_parts(request.job_id.as_deref(), request.visit_id.as_deref())
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    tracing::info!(job_ref = %job_ref, "Manual pipeline run requested");
    Ok(Json(state.runner.run(&job_ref).await))
}

/// Recent runs, newest first.
pub async fn list_runs_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<RunsQuery>,
) -> Json<Vec<RunRecord>> {
    let limit = query.limit.unwrap_or(DEFAULT_RUNS_LIMIT);
    Json(state.runner.history().recent(limit).await)
}
