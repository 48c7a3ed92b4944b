// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    github_publisher::upsert_project, BaseJobSource, BaseNotificationSender, BasePhotoProcessor,
    BaseRepositoryPublisher, BaseSocialPublisher, CommitReceipt, PhotoError, ServerDeps,
};
use crate::common::Credential;
use crate::domains::content::{ContentArtifact, ProcessedPhoto, SocialPost};
use crate::domains::jobs::{JobRecord, JobReference, PhotoRef};

// =============================================================================
// Mock Job Source
// =============================================================================

pub struct MockJobSource {
    jobs: Arc<Mutex<HashMap<String, JobRecord>>>,
    /// visit id -> job id
    visits: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<JobReference>>>,
}

impl MockJobSource {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            visits: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_job(self, job: JobRecord) -> Self {
        self.jobs.lock().unwrap().insert(job.id.clone(), job);
        self
    }

    pub fn with_visit(self, visit_id: &str, job_id: &str) -> Self {
        self.visits
            .lock()
            .unwrap()
            .insert(visit_id.to_string(), job_id.to_string());
        self
    }

    /// Get all references that were fetched
    pub fn calls(&self) -> Vec<JobReference> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseJobSource for MockJobSource {
    async fn fetch(&self, job_ref: &JobReference, _credential: &Credential) -> Result<JobRecord> {
        self.calls.lock().unwrap().push(job_ref.clone());

        let job_id = match job_ref {
            JobReference::Job(id) => id.clone(),
            JobReference::Visit(id) => match self.visits.lock().unwrap().get(id) {
                Some(job_id) => job_id.clone(),
                None => anyhow::bail!("visit not found: {}", id),
            },
        };

        match self.jobs.lock().unwrap().get(&job_id) {
            Some(job) => Ok(job.clone()),
            None => anyhow::bail!("job not found: {}", job_id),
        }
    }
}

// =============================================================================
// Mock Photo Processor
// =============================================================================

/// Scripted failure for a photo, keyed by photo id
#[derive(Debug, Clone)]
pub enum PhotoFailure {
    Rejected(String),
    Unavailable(String),
}

pub struct MockPhotoProcessor {
    failures: Arc<Mutex<HashMap<String, PhotoFailure>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPhotoProcessor {
    pub fn new() -> Self {
        Self {
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting(self, photo_id: &str, reason: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(photo_id.to_string(), PhotoFailure::Rejected(reason.to_string()));
        self
    }

    pub fn unavailable_for(self, photo_id: &str, reason: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(photo_id.to_string(), PhotoFailure::Unavailable(reason.to_string()));
        self
    }

    /// Photo ids seen, in completion order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePhotoProcessor for MockPhotoProcessor {
    async fn process(
        &self,
        photo: &PhotoRef,
        _credential: &Credential,
    ) -> std::result::Result<ProcessedPhoto, PhotoError> {
        self.calls.lock().unwrap().push(photo.id.clone());

        match self.failures.lock().unwrap().get(&photo.id) {
            Some(PhotoFailure::Rejected(reason)) => Err(PhotoError::Rejected(reason.clone())),
            Some(PhotoFailure::Unavailable(reason)) => Err(PhotoError::Unavailable(reason.clone())),
            None => Ok(ProcessedPhoto::success(
                &photo.id,
                format!("mock/{}", photo.id),
                format!("https://cdn.test/{}.jpg", photo.id),
            )),
        }
    }
}

// =============================================================================
// In-memory Repository Publisher
// =============================================================================

/// Keeps the project collection in memory, with the same upsert-by-slug
/// rule as the GitHub publisher.
pub struct MemoryRepositoryPublisher {
    entries: Arc<Mutex<Vec<Value>>>,
    commits: Arc<Mutex<usize>>,
    fail_with: Option<String>,
}

impl MemoryRepositoryPublisher {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            commits: Arc::new(Mutex::new(0)),
            fail_with: None,
        }
    }

    pub fn failing(mut self, error: &str) -> Self {
        self.fail_with = Some(error.to_string());
        self
    }

    pub fn entries(&self) -> Vec<Value> {
        self.entries.lock().unwrap().clone()
    }

    pub fn commit_count(&self) -> usize {
        *self.commits.lock().unwrap()
    }
}

#[async_trait]
impl BaseRepositoryPublisher for MemoryRepositoryPublisher {
    async fn upsert(&self, artifact: &ContentArtifact) -> Result<CommitReceipt> {
        if let Some(error) = &self.fail_with {
            anyhow::bail!("{}", error);
        }

        let entry = serde_json::to_value(artifact)?;
        let replaced = upsert_project(&mut self.entries.lock().unwrap(), entry);

        let mut commits = self.commits.lock().unwrap();
        *commits += 1;
        Ok(CommitReceipt {
            committed_ref: format!("commit-{}", *commits),
            replaced,
        })
    }
}

// =============================================================================
// Mock Social Publisher
// =============================================================================

pub struct MockSocialPublisher {
    posts: Arc<Mutex<Vec<SocialPost>>>,
    configured: bool,
    fail_with: Option<String>,
}

impl MockSocialPublisher {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            configured: true,
            fail_with: None,
        }
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn failing(mut self, error: &str) -> Self {
        self.fail_with = Some(error.to_string());
        self
    }

    pub fn posts(&self) -> Vec<SocialPost> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSocialPublisher for MockSocialPublisher {
    async fn post(&self, post: &SocialPost) -> Result<String> {
        if let Some(error) = &self.fail_with {
            anyhow::bail!("{}", error);
        }

        let mut posts = self.posts.lock().unwrap();
        posts.push(post.clone());
        Ok(format!("post-{}", posts.len()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

// =============================================================================
// Mock Notification Sender
// =============================================================================

/// Email captured by the mock sender
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub subject: String,
    pub body: String,
}

pub struct MockNotificationSender {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    configured: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseNotificationSender for MockNotificationSender {
    async fn send(&self, subject: &str, body: &str) -> Result<String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(format!("msg-{}", sent.len()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub job_source: Arc<MockJobSource>,
    pub photo_processor: Arc<MockPhotoProcessor>,
    pub repository: Arc<MemoryRepositoryPublisher>,
    pub social: Arc<MockSocialPublisher>,
    pub notifier: Arc<MockNotificationSender>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            job_source: Arc::new(MockJobSource::new()),
            photo_processor: Arc::new(MockPhotoProcessor::new()),
            repository: Arc::new(MemoryRepositoryPublisher::new()),
            social: Arc::new(MockSocialPublisher::new()),
            notifier: Arc::new(MockNotificationSender::new()),
        }
    }

    /// Set a mock job source
    pub fn mock_jobs(mut self, source: MockJobSource) -> Self {
        self.job_source = Arc::new(source);
        self
    }

    /// Set a mock photo processor
    pub fn mock_photos(mut self, processor: MockPhotoProcessor) -> Self {
        self.photo_processor = Arc::new(processor);
        self
    }

    pub fn mock_repository(mut self, repository: MemoryRepositoryPublisher) -> Self {
        self.repository = Arc::new(repository);
        self
    }

    pub fn mock_social(mut self, social: MockSocialPublisher) -> Self {
        self.social = Arc::new(social);
        self
    }

    pub fn mock_notifier(mut self, notifier: MockNotificationSender) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Build ServerDeps sharing these mocks, so calls stay observable
    pub fn server_deps(&self) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.job_source.clone(),
            self.photo_processor.clone(),
            self.repository.clone(),
            self.social.clone(),
            self.notifier.clone(),
        ))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
