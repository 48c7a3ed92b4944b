//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::Credential;
use crate::config::PipelineConfig;
use crate::domains::jobber::{self, WebhookState};
use crate::domains::pipeline::{PipelineOrchestrator, PipelineRunner};
use crate::kernel::{RunHistory, ServerDeps};
use crate::server::routes::{health_handler, list_runs_handler, run_pipeline_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    pub runner: PipelineRunner,
}

impl AppState {
    pub fn new(deps: Arc<ServerDeps>, credential: Credential, pipeline: PipelineConfig) -> Self {
        let orchestrator = Arc::new(PipelineOrchestrator::with_deps(deps.clone()));
        let runner = PipelineRunner::new(
            orchestrator,
            Arc::new(credential),
            Arc::new(pipeline),
            RunHistory::new(),
        );

        Self { deps, runner }
    }
}

/// Build the axum router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin for the dashboard
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let webhooks = jobber::router(WebhookState {
        runner: state.runner.clone(),
    });

    Router::new()
        .route("/health", get(health_handler))
        .route("/pipeline/run", post(run_pipeline_handler))
        .route("/pipeline/runs", get(list_runs_handler))
        .layer(Extension(state))
        .merge(webhooks)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
