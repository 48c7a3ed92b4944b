//! Boundary errors for starting a pipeline run.
//!
//! Collaborator failures never surface here; they are recorded as `Failed`
//! step outcomes on the run record.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither a job id nor a visit id was supplied.
    #[error("Missing jobId or visitId")]
    MissingJobReference,
}
