use std::sync::Arc;

use crate::common::Credential;
use crate::config::PipelineConfig;
use crate::domains::jobs::JobReference;
use crate::kernel::RunHistory;

use super::models::RunRecord;
use super::orchestrator::PipelineOrchestrator;

/// Everything an entry point needs to start a run and keep its record.
#[derive(Clone)]
pub struct PipelineRunner {
    orchestrator: Arc<PipelineOrchestrator>,
    credential: Arc<Credential>,
    config: Arc<PipelineConfig>,
    history: RunHistory,
}

impl PipelineRunner {
    pub fn new(
        orchestrator: Arc<PipelineOrchestrator>,
        credential: Arc<Credential>,
        config: Arc<PipelineConfig>,
        history: RunHistory,
    ) -> Self {
        Self {
            orchestrator,
            credential,
            config,
            history,
        }
    }

    pub async fn run(&self, job_ref: &JobReference) -> RunRecord {
        let record = self
            .orchestrator
            .run(job_ref, &self.credential, &self.config)
            .await;
        self.history.push(record.clone()).await;
        record
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }
}
