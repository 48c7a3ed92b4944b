//! Run record model: the audit trail of one pipeline execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::jobs::JobReference;

/// Fixed pipeline step names, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepName {
    #[serde(rename = "fetchJob")]
    FetchJob,
    #[serde(rename = "processPhotos")]
    ProcessPhotos,
    #[serde(rename = "generateProject")]
    GenerateProject,
    #[serde(rename = "commitToGithub")]
    CommitToGithub,
    #[serde(rename = "postToGMB")]
    PostToGmb,
    #[serde(rename = "emailSocialDrafts")]
    EmailSocialDrafts,
}

impl StepName {
    pub const ALL: [StepName; 6] = [
        StepName::FetchJob,
        StepName::ProcessPhotos,
        StepName::GenerateProject,
        StepName::CommitToGithub,
        StepName::PostToGmb,
        StepName::EmailSocialDrafts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::FetchJob => "fetchJob",
            StepName::ProcessPhotos => "processPhotos",
            StepName::GenerateProject => "generateProject",
            StepName::CommitToGithub => "commitToGithub",
            StepName::PostToGmb => "postToGMB",
            StepName::EmailSocialDrafts => "emailSocialDrafts",
        }
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Complete,
    Failed,
    Skipped,
}

/// Outcome of one step. Leaves `Pending` at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StepOutcome<D> {
    Pending,
    Complete {
        data: D,
        completed_at: DateTime<Utc>,
    },
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
    Skipped {
        reason: String,
        skipped_at: DateTime<Utc>,
    },
}

impl<D> StepOutcome<D> {
    pub fn status(&self) -> StepStatus {
        match self {
            StepOutcome::Pending => StepStatus::Pending,
            StepOutcome::Complete { .. } => StepStatus::Complete,
            StepOutcome::Failed { .. } => StepStatus::Failed,
            StepOutcome::Skipped { .. } => StepStatus::Skipped,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, StepOutcome::Pending)
    }

    /// When the step left `Pending`.
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        match self {
            StepOutcome::Pending => None,
            StepOutcome::Complete { completed_at, .. } => Some(*completed_at),
            StepOutcome::Failed { failed_at, .. } => Some(*failed_at),
            StepOutcome::Skipped { skipped_at, .. } => Some(*skipped_at),
        }
    }

    pub fn data(&self) -> Option<&D> {
        match self {
            StepOutcome::Complete { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StepOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Skipped { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl<D> Default for StepOutcome<D> {
    fn default() -> Self {
        StepOutcome::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchJobData {
    pub job_id: String,
    pub job_number: Option<i64>,
    pub city: String,
    pub service: String,
    pub photo_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPhotosData {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProjectData {
    pub slug: String,
    pub title: String,
    pub photo_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitData {
    pub committed_ref: String,
    pub slug: String,
    /// True when an entry with the same slug was replaced.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostData {
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailData {
    pub message_id: String,
    pub caption_count: usize,
}

/// The six step slots. Being a struct, the set and order of steps is fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSteps {
    pub fetch_job: StepOutcome<FetchJobData>,
    pub process_photos: StepOutcome<ProcessPhotosData>,
    pub generate_project: StepOutcome<GenerateProjectData>,
    pub commit_to_github: StepOutcome<CommitData>,
    #[serde(rename = "postToGMB")]
    pub post_to_gmb: StepOutcome<SocialPostData>,
    pub email_social_drafts: StepOutcome<EmailData>,
}

impl RunSteps {
    /// Status and settle time of every step, in execution order.
    pub fn statuses(&self) -> [(StepName, StepStatus, Option<DateTime<Utc>>); 6] {
        [
            (StepName::FetchJob, self.fetch_job.status(), self.fetch_job.settled_at()),
            (StepName::ProcessPhotos, self.process_photos.status(), self.process_photos.settled_at()),
            (StepName::GenerateProject, self.generate_project.status(), self.generate_project.settled_at()),
            (StepName::CommitToGithub, self.commit_to_github.status(), self.commit_to_github.settled_at()),
            (StepName::PostToGmb, self.post_to_gmb.status(), self.post_to_gmb.settled_at()),
            (StepName::EmailSocialDrafts, self.email_social_drafts.status(), self.email_social_drafts.settled_at()),
        ]
    }

    pub fn status_of(&self, name: StepName) -> StepStatus {
        self.statuses()
            .into_iter()
            .find(|(step, _, _)| *step == name)
            .map(|(_, status, _)| status)
            .unwrap_or(StepStatus::Pending)
    }

    pub fn counts(&self) -> StepCounts {
        let mut counts = StepCounts::default();
        for (_, status, _) in self.statuses() {
            match status {
                StepStatus::Pending => counts.pending += 1,
                StepStatus::Complete => counts.completed += 1,
                StepStatus::Failed => counts.failed += 1,
                StepStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pending: usize,
}

/// Aggregate result of one pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// Job or visit id the run was started for.
    pub id: String,
    pub reference: Option<JobReference>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub steps: RunSteps,
    pub overall_success: bool,
    pub summary: String,
}

impl RunRecord {
    pub fn new(id: impl Into<String>, reference: Option<JobReference>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            reference,
            started_at,
            completed_at: None,
            steps: RunSteps::default(),
            overall_success: false,
            summary: String::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }
}
