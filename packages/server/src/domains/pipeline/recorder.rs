//! Step outcome recorder - the only writer of a run record during a run.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domains::jobs::JobReference;

use super::models::{RunRecord, StepOutcome};
use super::policy::{overall_success, summarize};
use super::steps::Step;

pub struct StepRecorder {
    record: RunRecord,
    last_stamp: DateTime<Utc>,
}

impl StepRecorder {
    pub fn start(id: impl Into<String>, reference: Option<JobReference>) -> Self {
        let now = Utc::now();
        Self {
            record: RunRecord::new(id, reference, now),
            last_stamp: now,
        }
    }

    /// Current time, never earlier than any stamp already handed out.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now().max(self.last_stamp);
        self.last_stamp = now;
        now
    }

    pub fn mark_complete<S: Step>(&mut self, data: S::Data) {
        let completed_at = self.stamp();
        info!(run_id = %self.record.id, step = S::NAME.as_str(), "Step complete");
        self.settle::<S>(StepOutcome::Complete { data, completed_at });
    }

    pub fn mark_failed<S: Step>(&mut self, error: impl Into<String>) {
        let error = error.into();
        let failed_at = self.stamp();
        warn!(run_id = %self.record.id, step = S::NAME.as_str(), error = %error, "Step failed");
        self.settle::<S>(StepOutcome::Failed { error, failed_at });
    }

    pub fn mark_skipped<S: Step>(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        let skipped_at = self.stamp();
        info!(run_id = %self.record.id, step = S::NAME.as_str(), reason = %reason, "Step skipped");
        self.settle::<S>(StepOutcome::Skipped { reason, skipped_at });
    }

    /// Panics if the step already left `Pending`: settling twice is a bug in
    /// the orchestrator, not a runtime condition.
    fn settle<S: Step>(&mut self, outcome: StepOutcome<S::Data>) {
        let slot = S::slot(&mut self.record.steps);
        assert!(slot.is_pending(), "step {} already settled", S::NAME);
        *slot = outcome;
    }

    pub fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Close the run normally: compute overall success and the summary line.
    pub fn finish(mut self) -> RunRecord {
        let counts = self.record.steps.counts();
        let success = overall_success(&counts);

        self.record.completed_at = Some(self.stamp());
        self.record.overall_success = success;
        self.record.summary = summarize(&counts, success);
        self.record
    }

    /// Close the run after a fatal failure. Remaining steps stay `Pending`.
    pub fn abort(mut self, summary: impl Into<String>) -> RunRecord {
        self.record.completed_at = Some(self.stamp());
        self.record.overall_success = false;
        self.record.summary = summary.into();
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pipeline::models::{ProcessPhotosData, StepStatus};
    use crate::domains::pipeline::steps::{FetchJob, GenerateProject, ProcessPhotos};
    use crate::domains::pipeline::FetchJobData;

    fn fetch_data() -> FetchJobData {
        FetchJobData {
            job_id: "job-1".into(),
            job_number: None,
            city: "Denver".into(),
            service: "Roofing".into(),
            photo_count: 0,
        }
    }

    #[test]
    fn marks_steps_and_finishes() {
        let mut recorder = StepRecorder::start("job-1", None);
        recorder.mark_complete::<FetchJob>(fetch_data());
        recorder.mark_skipped::<ProcessPhotos>("No photos in job");
        recorder.mark_failed::<GenerateProject>("boom");

        let record = recorder.finish();
        assert_eq!(record.steps.fetch_job.status(), StepStatus::Complete);
        assert_eq!(record.steps.process_photos.reason(), Some("No photos in job"));
        assert_eq!(record.steps.generate_project.error(), Some("boom"));
        assert!(record.completed_at.is_some());
        assert!(!record.overall_success);
        assert_eq!(record.summary, "1 complete, 1 failed, 1 skipped (success: false)");
    }

    #[test]
    #[should_panic(expected = "step processPhotos already settled")]
    fn settling_twice_panics() {
        let mut recorder = StepRecorder::start("job-1", None);
        recorder.mark_complete::<ProcessPhotos>(ProcessPhotosData {
            total: 1,
            successful: 1,
            failed: 0,
        });
        recorder.mark_failed::<ProcessPhotos>("again");
    }

    #[test]
    fn abort_leaves_remaining_steps_pending() {
        let mut recorder = StepRecorder::start("job-1", None);
        recorder.mark_failed::<FetchJob>("not found");

        let record = recorder.abort("Could not fetch job data: not found");
        assert_eq!(record.steps.counts().pending, 5);
        assert!(!record.overall_success);
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn stamps_never_go_backwards() {
        let mut recorder = StepRecorder::start("job-1", None);
        let mut previous = recorder.record().started_at;
        for _ in 0..100 {
            let stamp = recorder.stamp();
            assert!(stamp >= previous);
            previous = stamp;
        }
    }
}
