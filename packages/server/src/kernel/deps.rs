//! Server dependencies for the pipeline (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! orchestrator. All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobber_client::JobberClient;
use std::sync::Arc;

use crate::common::Credential;
use crate::config::Config;
use crate::domains::jobs::{JobRecord, JobReference};
use crate::kernel::{
    create_notification_sender, create_photo_processor, create_repository_publisher,
    create_social_publisher, BaseJobSource, BaseNotificationSender, BasePhotoProcessor,
    BaseRepositoryPublisher, BaseSocialPublisher,
};

// =============================================================================
// JobberClient Adapter (implements BaseJobSource trait)
// =============================================================================

/// Wrapper around JobberClient that implements BaseJobSource trait
pub struct JobberJobSource(pub Arc<JobberClient>);

impl JobberJobSource {
    pub fn new(client: Arc<JobberClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseJobSource for JobberJobSource {
    async fn fetch(&self, job_ref: &JobReference, credential: &Credential) -> Result<JobRecord> {
        let node = match job_ref {
            JobReference::Job(id) => self.0.fetch_job(credential.expose(), id).await,
            JobReference::Visit(id) => self.0.fetch_job_for_visit(credential.expose(), id).await,
        }
        .with_context(|| format!("Failed to fetch {}", job_ref))?;

        Ok(JobRecord::from(node))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Collaborators available to a pipeline run (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub job_source: Arc<dyn BaseJobSource>,
    pub photo_processor: Arc<dyn BasePhotoProcessor>,
    pub repository: Arc<dyn BaseRepositoryPublisher>,
    pub social: Arc<dyn BaseSocialPublisher>,
    pub notifier: Arc<dyn BaseNotificationSender>,
}

impl ServerDeps {
    pub fn new(
        job_source: Arc<dyn BaseJobSource>,
        photo_processor: Arc<dyn BasePhotoProcessor>,
        repository: Arc<dyn BaseRepositoryPublisher>,
        social: Arc<dyn BaseSocialPublisher>,
        notifier: Arc<dyn BaseNotificationSender>,
    ) -> Self {
        Self {
            job_source,
            photo_processor,
            repository,
            social,
            notifier,
        }
    }

    /// Real collaborators where credentials exist, no-op ones elsewhere.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(JobberJobSource::new(Arc::new(JobberClient::new()))),
            create_photo_processor(config.cloudinary.as_ref())?,
            create_repository_publisher(config.github.as_ref()),
            create_social_publisher(config.gmb.as_ref())?,
            create_notification_sender(config.email.as_ref())?,
        ))
    }
}
