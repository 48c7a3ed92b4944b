//! Runs the six showcase steps for one completed job.
//!
//! Steps run strictly in order. Only a failed fetch ends a run early; every
//! other failure is recorded on its step and the run moves on. Steps that need
//! a project page skip themselves when none was generated.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use crate::common::utils::derive_seed;
use crate::common::Credential;
use crate::config::PipelineConfig;
use crate::domains::content::{
    build_project, caption_variants, draft_email, extract_content, promo_post, BuildOptions,
    ContentArtifact, ContentData, ProcessedPhoto,
};
use crate::domains::jobs::JobReference;
use crate::kernel::{PhotoError, ServerDeps};

use super::context::PipelineContext;
use super::models::{
    CommitData, EmailData, FetchJobData, GenerateProjectData, ProcessPhotosData, RunRecord,
    SocialPostData,
};
use super::recorder::StepRecorder;
use super::steps::{
    CommitToGithub, EmailSocialDrafts, FetchJob, GenerateProject, PostToGmb, ProcessPhotos,
};

const NO_PROJECT: &str = "No project generated";
/// Run id used when the input named no job or visit.
pub const UNKNOWN_RUN_ID: &str = "unknown";

pub struct PipelineOrchestrator {
    deps: Arc<ServerDeps>,
}

impl PipelineOrchestrator {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }

    /// Run from raw ids as they arrive at the boundary. A missing reference
    /// yields a finished record with `fetchJob` failed and nothing else run.
    pub async fn run_for_ids(
        &self,
        job_id: Option<&str>,
        visit_id: Option<&str>,
        credential: &Credential,
        config: &PipelineConfig,
    ) -> RunRecord {
        match JobReference::from_parts(job_id, visit_id) {
            Ok(job_ref) => self.run(&job_ref, credential, config).await,
            Err(e) => {
                warn!(error = %e, "Pipeline run rejected");
                let mut recorder = StepRecorder::start(UNKNOWN_RUN_ID, None);
                recorder.mark_failed::<FetchJob>(e.to_string());
                recorder.abort(e.to_string())
            }
        }
    }

    pub async fn run(
        &self,
        job_ref: &JobReference,
        credential: &Credential,
        config: &PipelineConfig,
    ) -> RunRecord {
        info!(job_ref = %job_ref, "Starting showcase pipeline");

        let mut recorder = StepRecorder::start(job_ref.id(), Some(job_ref.clone()));

        // 1. Fetch job (fatal on failure)
        let content = match self.deps.job_source.fetch(job_ref, credential).await {
            Ok(job) => {
                let content = extract_content(&job);
                recorder.mark_complete::<FetchJob>(FetchJobData {
                    job_id: content.job_id.clone(),
                    job_number: content.job_number,
                    city: content.city.clone(),
                    service: content.service.clone(),
                    photo_count: content.photos.len(),
                });
                content
            }
            Err(e) => {
                let error = format!("{:#}", e);
                recorder.mark_failed::<FetchJob>(error.clone());
                let record = recorder.abort(format!("Could not fetch job data: {}", error));
                warn!(job_ref = %job_ref, summary = %record.summary, "Pipeline aborted");
                return record;
            }
        };

        let seed = config
            .content_seed
            .unwrap_or_else(|| derive_seed(&content.job_id));
        let mut ctx = PipelineContext::new(content);

        // 2. Process photos
        self.process_photos(&mut recorder, &mut ctx, credential, config)
            .await;

        // 3. Generate project
        ctx.artifact = generate_project(&mut recorder, &ctx.content, config, seed);

        // 4-6. Publish
        self.commit_to_github(&mut recorder, ctx.artifact(), config)
            .await;
        self.post_to_gmb(&mut recorder, ctx.artifact(), config).await;
        self.email_social_drafts(&mut recorder, ctx.artifact(), config, seed)
            .await;

        let record = recorder.finish();
        info!(
            job_ref = %job_ref,
            overall_success = record.overall_success,
            summary = %record.summary,
            "Showcase pipeline finished"
        );
        record
    }

    async fn process_photos(
        &self,
        recorder: &mut StepRecorder,
        ctx: &mut PipelineContext,
        credential: &Credential,
        config: &PipelineConfig,
    ) {
        let content = &mut ctx.content;
        if !config.enable_photo_processing {
            recorder.mark_skipped::<ProcessPhotos>("Photo processing disabled");
            return;
        }
        if content.photos.is_empty() {
            recorder.mark_skipped::<ProcessPhotos>("No photos in job");
            return;
        }

        let processor = &self.deps.photo_processor;
        let results = join_all(
            content
                .photos
                .iter()
                .map(|photo| processor.process(photo, credential)),
        )
        .await;

        let mut processed = Vec::with_capacity(results.len());
        let mut unavailable = None;
        for (photo, result) in content.photos.iter().zip(results) {
            match result {
                Ok(photo) => processed.push(photo),
                Err(PhotoError::Rejected(reason)) => {
                    warn!(photo_id = %photo.id, reason = %reason, "Photo rejected");
                    processed.push(ProcessedPhoto::failure(&photo.id, reason));
                }
                Err(PhotoError::Unavailable(reason)) => {
                    processed.push(ProcessedPhoto::failure(&photo.id, reason.clone()));
                    unavailable.get_or_insert(reason);
                }
            }
        }

        let total = processed.len();
        let successful = processed.iter().filter(|p| p.processed).count();
        content.processed_photos = processed;

        match unavailable {
            Some(reason) => recorder.mark_failed::<ProcessPhotos>(format!(
                "Photo processor unavailable: {} ({} of {} photos processed)",
                reason, successful, total
            )),
            None => recorder.mark_complete::<ProcessPhotos>(ProcessPhotosData {
                total,
                successful,
                failed: total - successful,
            }),
        }
    }

    async fn commit_to_github(
        &self,
        recorder: &mut StepRecorder,
        artifact: Option<&ContentArtifact>,
        config: &PipelineConfig,
    ) {
        let artifact = match publish_gate(
            artifact,
            config.enable_github_commit,
            "GitHub publishing disabled",
            self.deps.repository.is_configured(),
            "GitHub credentials not configured",
        ) {
            Ok(artifact) => artifact,
            Err(reason) => return recorder.mark_skipped::<CommitToGithub>(reason),
        };

        match self.deps.repository.upsert(artifact).await {
            Ok(receipt) => recorder.mark_complete::<CommitToGithub>(CommitData {
                committed_ref: receipt.committed_ref,
                slug: artifact.slug.clone(),
                replaced: receipt.replaced,
            }),
            Err(e) => recorder.mark_failed::<CommitToGithub>(format!("{:#}", e)),
        }
    }

    async fn post_to_gmb(
        &self,
        recorder: &mut StepRecorder,
        artifact: Option<&ContentArtifact>,
        config: &PipelineConfig,
    ) {
        let artifact = match publish_gate(
            artifact,
            config.enable_gmb_post,
            "GMB posting disabled",
            self.deps.social.is_configured(),
            "GMB credentials not configured",
        ) {
            Ok(artifact) => artifact,
            Err(reason) => return recorder.mark_skipped::<PostToGmb>(reason),
        };

        match self.deps.social.post(&promo_post(artifact)).await {
            Ok(post_id) => recorder.mark_complete::<PostToGmb>(SocialPostData { post_id }),
            Err(e) => recorder.mark_failed::<PostToGmb>(format!("{:#}", e)),
        }
    }

    async fn email_social_drafts(
        &self,
        recorder: &mut StepRecorder,
        artifact: Option<&ContentArtifact>,
        config: &PipelineConfig,
        seed: u64,
    ) {
        let artifact = match publish_gate(
            artifact,
            config.enable_email_drafts,
            "Email drafts disabled",
            self.deps.notifier.is_configured(),
            "Email credentials not configured",
        ) {
            Ok(artifact) => artifact,
            Err(reason) => return recorder.mark_skipped::<EmailSocialDrafts>(reason),
        };

        // Offset so captions don't replay the page's template picks.
        let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(1));
        let captions = caption_variants(artifact, &mut rng);
        let email = draft_email(artifact, &captions);

        match self.deps.notifier.send(&email.subject, &email.body).await {
            Ok(message_id) => recorder.mark_complete::<EmailSocialDrafts>(EmailData {
                message_id,
                caption_count: captions.len(),
            }),
            Err(e) => recorder.mark_failed::<EmailSocialDrafts>(format!("{:#}", e)),
        }
    }
}

fn generate_project(
    recorder: &mut StepRecorder,
    content: &ContentData,
    config: &PipelineConfig,
    seed: u64,
) -> Option<ContentArtifact> {
    if !config.enable_project_generation {
        recorder.mark_skipped::<GenerateProject>("Project generation disabled");
        return None;
    }
    if content.successful_photo_count() < config.min_photos {
        recorder.mark_skipped::<GenerateProject>(format!(
            "Need at least {} photo(s)",
            config.min_photos
        ));
        return None;
    }

    let options = BuildOptions::new(seed, config.site_url.clone(), Utc::now());
    match build_project(content, &options) {
        Ok(artifact) => {
            recorder.mark_complete::<GenerateProject>(GenerateProjectData {
                slug: artifact.slug.clone(),
                title: artifact.title.clone(),
                photo_count: artifact.media.len(),
            });
            Some(artifact)
        }
        Err(e) => {
            recorder.mark_failed::<GenerateProject>(e.to_string());
            None
        }
    }
}

/// Prerequisites shared by the publishing steps, in the order they are
/// reported: a project exists, the step is enabled, credentials are present.
fn publish_gate<'a>(
    artifact: Option<&'a ContentArtifact>,
    enabled: bool,
    disabled_reason: &'static str,
    configured: bool,
    unconfigured_reason: &'static str,
) -> Result<&'a ContentArtifact, &'static str> {
    let artifact = artifact.ok_or(NO_PROJECT)?;
    if !enabled {
        return Err(disabled_reason);
    }
    if !configured {
        return Err(unconfigured_reason);
    }
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ContentArtifact {
        ContentArtifact {
            slug: "s".into(),
            title: "t".into(),
            summary: String::new(),
            body: String::new(),
            city: "c".into(),
            service: "v".into(),
            page_url: None,
            media: Vec::new(),
            structured_data: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_project_is_reported_before_flags() {
        assert_eq!(
            publish_gate(None, false, "disabled", false, "unconfigured").unwrap_err(),
            NO_PROJECT
        );
    }

    #[test]
    fn disabled_is_reported_before_credentials() {
        let artifact = artifact();
        assert_eq!(
            publish_gate(Some(&artifact), false, "disabled", false, "unconfigured").unwrap_err(),
            "disabled"
        );
        assert_eq!(
            publish_gate(Some(&artifact), true, "disabled", false, "unconfigured").unwrap_err(),
            "unconfigured"
        );
        assert!(publish_gate(Some(&artifact), true, "disabled", true, "unconfigured").is_ok());
    }
}
