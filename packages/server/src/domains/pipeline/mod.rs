//! Pipeline domain - sequences the showcase steps and records their outcomes.

pub mod context;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod recorder;
pub mod runner;
pub mod steps;

pub use context::PipelineContext;
pub use error::PipelineError;
pub use models::*;
pub use orchestrator::{PipelineOrchestrator, UNKNOWN_RUN_ID};
pub use policy::{overall_success, summarize};
pub use recorder::StepRecorder;
pub use runner::PipelineRunner;
pub use steps::*;
