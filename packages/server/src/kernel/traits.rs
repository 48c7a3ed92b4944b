// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Step sequencing and content rules live in domains/ and call through these.
//
// Naming convention: Base* for trait names (e.g., BaseJobSource, BaseSocialPublisher)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::common::Credential;
use crate::domains::content::{ContentArtifact, ProcessedPhoto, SocialPost};
use crate::domains::jobs::{JobRecord, JobReference, PhotoRef};

// =============================================================================
// Job Source Trait (Infrastructure - field-service platform)
// =============================================================================

#[async_trait]
pub trait BaseJobSource: Send + Sync {
    /// Resolve a job or visit reference to a normalized job record
    async fn fetch(&self, job_ref: &JobReference, credential: &Credential) -> Result<JobRecord>;
}

// =============================================================================
// Photo Processor Trait (Infrastructure - image hosting)
// =============================================================================

/// Photo processing failure, split by blast radius.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// This photo could not be processed; other photos are unaffected
    #[error("photo rejected: {0}")]
    Rejected(String),

    /// The processor itself is unreachable or misconfigured
    #[error("photo processor unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait BasePhotoProcessor: Send + Sync {
    /// Process one raw photo into a hosted, normalized photo record
    async fn process(
        &self,
        photo: &PhotoRef,
        credential: &Credential,
    ) -> std::result::Result<ProcessedPhoto, PhotoError>;

    /// False for the pass-through processor used without an image host
    fn is_configured(&self) -> bool {
        true
    }
}

// =============================================================================
// Repository Publisher Trait (Infrastructure - website content repo)
// =============================================================================

/// Result of upserting a project into the repository collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub committed_ref: String,
    /// True when an existing entry with the same slug was replaced
    pub replaced: bool,
}

#[async_trait]
pub trait BaseRepositoryPublisher: Send + Sync {
    /// Upsert the artifact into the project collection, keyed by slug
    async fn upsert(&self, artifact: &ContentArtifact) -> Result<CommitReceipt>;

    /// False for no-op publishers built without credentials
    fn is_configured(&self) -> bool {
        true
    }
}

// =============================================================================
// Social Publisher Trait (Infrastructure - business profile)
// =============================================================================

#[async_trait]
pub trait BaseSocialPublisher: Send + Sync {
    /// Publish a post, returning the platform's post id
    async fn post(&self, post: &SocialPost) -> Result<String>;

    fn is_configured(&self) -> bool {
        true
    }
}

// =============================================================================
// Notification Sender Trait (Infrastructure - internal email)
// =============================================================================

#[async_trait]
pub trait BaseNotificationSender: Send + Sync {
    /// Send an internal notification, returning the provider's message id
    async fn send(&self, subject: &str, body: &str) -> Result<String>;

    fn is_configured(&self) -> bool {
        true
    }
}
