//! Test harness wiring mock collaborators into the real orchestrator and router.
//!
//! Every collaborator is an in-memory mock from `kernel::test_dependencies`,
//! so tests run without network access and can inspect what was published.

use std::time::Duration;

use axum::Router;
use showcase_core::common::Credential;
use showcase_core::domains::jobs::JobReference;
use showcase_core::domains::pipeline::{PipelineOrchestrator, RunRecord};
use showcase_core::kernel::test_dependencies::MockJobSource;
use showcase_core::kernel::TestDependencies;
use showcase_core::server::{build_app, AppState};
use showcase_core::PipelineConfig;
use test_context::AsyncTestContext;

use super::completed_job;

/// Job id of the fixture job loaded by the default harness.
pub const JOB_ID: &str = "job-1";
/// Visit id that resolves to [`JOB_ID`] in the default harness.
pub const VISIT_ID: &str = "visit-1";

/// Test harness that manages mock collaborators and app state.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let record = ctx.run_job(JOB_ID).await;
///     // ... assertions
/// }
/// ```
pub struct TestHarness {
    pub deps: TestDependencies,
    pub config: PipelineConfig,
    pub credential: Credential,
    pub state: AppState,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        let deps = TestDependencies::new().mock_jobs(
            MockJobSource::new()
                .with_job(completed_job(JOB_ID, 3))
                .with_visit(VISIT_ID, JOB_ID),
        );
        Self::with_deps(deps, PipelineConfig::default())
    }

    async fn teardown(self) {
        // Mocks are dropped with the harness
    }
}

impl TestHarness {
    /// Build a harness around custom mocks and config.
    pub fn with_deps(deps: TestDependencies, config: PipelineConfig) -> Self {
        // Run with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let state = AppState::new(deps.server_deps(), Credential::new("test-token"), config.clone());

        Self {
            deps,
            config,
            credential: Credential::new("test-token"),
            state,
        }
    }

    pub fn orchestrator(&self) -> PipelineOrchestrator {
        PipelineOrchestrator::with_deps(self.deps.server_deps())
    }

    pub async fn run(&self, job_ref: &JobReference) -> RunRecord {
        self.orchestrator()
            .run(job_ref, &self.credential, &self.config)
            .await
    }

    pub async fn run_job(&self, job_id: &str) -> RunRecord {
        self.run(&JobReference::Job(job_id.to_string())).await
    }

    pub fn app(&self) -> Router {
        build_app(self.state.clone())
    }

    /// Wait for a background run to land in history.
    pub async fn wait_for_runs(&self, count: usize) -> Vec<RunRecord> {
        let history = self.state.runner.history();
        for _ in 0..200 {
            if history.len().await >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        history.recent(usize::MAX).await
    }
}
