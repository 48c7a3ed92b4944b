use anyhow::{Context, Result};
use dotenvy::dotenv;
use github_client::RepoRef;
use std::env;

use crate::common::Credential;

const DEFAULT_PROJECTS_PATH: &str = "src/data/projects.json";
const DEFAULT_BRANCH: &str = "main";

/// Application configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub jobber_access_token: Credential,
    pub cloudinary: Option<CloudinaryConfig>,
    pub github: Option<GithubConfig>,
    pub gmb: Option<GmbConfig>,
    pub email: Option<EmailConfig>,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug)]
pub struct GithubConfig {
    pub token: Credential,
    pub repo: RepoRef,
    /// Path of the JSON project collection inside the repository
    pub projects_path: String,
    pub branch: String,
}

#[derive(Debug)]
pub struct GmbConfig {
    pub access_token: Credential,
    pub account_id: String,
    pub location_id: String,
}

#[derive(Debug)]
pub struct EmailConfig {
    pub server_token: Credential,
    pub from: String,
    pub to: String,
}

/// Per-run switches, passed into every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub enable_photo_processing: bool,
    pub enable_project_generation: bool,
    pub enable_github_commit: bool,
    pub enable_gmb_post: bool,
    pub enable_email_drafts: bool,
    /// Successfully processed photos needed before a project is generated
    pub min_photos: usize,
    /// Pins content generation to one seed instead of deriving it per job
    pub content_seed: Option<u64>,
    pub site_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enable_photo_processing: true,
            enable_project_generation: true,
            enable_github_commit: true,
            enable_gmb_post: true,
            enable_email_drafts: true,
            min_photos: 1,
            content_seed: None,
            site_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let jobber_access_token = var("JOBBER_ACCESS_TOKEN")
            .map(Credential::new)
            .context("JOBBER_ACCESS_TOKEN must be set")?;

        let port = var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let cloudinary = match (var("CLOUDINARY_CLOUD_NAME"), var("CLOUDINARY_UPLOAD_PRESET")) {
            (Some(cloud_name), Some(upload_preset)) => Some(CloudinaryConfig {
                cloud_name,
                upload_preset,
            }),
            _ => None,
        };

        let github = match (var("GITHUB_TOKEN"), var("GITHUB_REPO")) {
            (Some(token), Some(repo)) => Some(GithubConfig {
                token: Credential::new(token),
                repo: RepoRef::parse(&repo)
                    .with_context(|| format!("GITHUB_REPO must look like owner/name, got {}", repo))?,
                projects_path: var("GITHUB_PROJECTS_PATH")
                    .unwrap_or_else(|| DEFAULT_PROJECTS_PATH.to_string()),
                branch: var("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            }),
            _ => None,
        };

        let gmb = match (
            var("GMB_ACCESS_TOKEN"),
            var("GMB_ACCOUNT_ID"),
            var("GMB_LOCATION_ID"),
        ) {
            (Some(token), Some(account_id), Some(location_id)) => Some(GmbConfig {
                access_token: Credential::new(token),
                account_id,
                location_id,
            }),
            _ => None,
        };

        let email = match (var("POSTMARK_SERVER_TOKEN"), var("EMAIL_FROM"), var("EMAIL_TO")) {
            (Some(token), Some(from), Some(to)) => Some(EmailConfig {
                server_token: Credential::new(token),
                from,
                to,
            }),
            _ => None,
        };

        let defaults = PipelineConfig::default();
        let flag = |key: &str, default: bool| -> Result<bool> {
            match var(key) {
                Some(value) => parse_flag(&value).with_context(|| format!("{} must be true or false", key)),
                None => Ok(default),
            }
        };

        let pipeline = PipelineConfig {
            enable_photo_processing: flag("ENABLE_PHOTO_PROCESSING", defaults.enable_photo_processing)?,
            enable_project_generation: flag("ENABLE_PROJECT_GENERATION", defaults.enable_project_generation)?,
            enable_github_commit: flag("ENABLE_GITHUB_COMMIT", defaults.enable_github_commit)?,
            enable_gmb_post: flag("ENABLE_GMB_POST", defaults.enable_gmb_post)?,
            enable_email_drafts: flag("ENABLE_EMAIL_DRAFTS", defaults.enable_email_drafts)?,
            min_photos: match var("MIN_PHOTOS") {
                Some(value) => value.parse().context("MIN_PHOTOS must be a whole number")?,
                None => defaults.min_photos,
            },
            content_seed: var("CONTENT_SEED")
                .map(|value| value.parse())
                .transpose()
                .context("CONTENT_SEED must be an unsigned integer")?,
            site_url: var("SITE_URL"),
        };

        Ok(Self {
            port,
            jobber_access_token,
            cloudinary,
            github,
            gmb,
            email,
            pipeline,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn requires_jobber_token() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("JOBBER_ACCESS_TOKEN"));
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = load(&[("JOBBER_ACCESS_TOKEN", "tok")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.jobber_access_token.expose(), "tok");
        assert!(config.cloudinary.is_none());
        assert!(config.github.is_none());
        assert!(config.gmb.is_none());
        assert!(config.email.is_none());
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn parses_flags_and_numbers() {
        let config = load(&[
            ("JOBBER_ACCESS_TOKEN", "tok"),
            ("ENABLE_GMB_POST", "false"),
            ("ENABLE_EMAIL_DRAFTS", "0"),
            ("ENABLE_GITHUB_COMMIT", " YES "),
            ("MIN_PHOTOS", "3"),
            ("CONTENT_SEED", "42"),
            ("SITE_URL", "https://example.com"),
        ])
        .unwrap();

        assert!(!config.pipeline.enable_gmb_post);
        assert!(!config.pipeline.enable_email_drafts);
        assert!(config.pipeline.enable_github_commit);
        assert!(config.pipeline.enable_photo_processing);
        assert_eq!(config.pipeline.min_photos, 3);
        assert_eq!(config.pipeline.content_seed, Some(42));
        assert_eq!(config.pipeline.site_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn rejects_unknown_flag_values() {
        let err = load(&[("JOBBER_ACCESS_TOKEN", "tok"), ("ENABLE_GMB_POST", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("ENABLE_GMB_POST"));
    }

    #[test]
    fn github_group_needs_valid_repo() {
        let config = load(&[
            ("JOBBER_ACCESS_TOKEN", "tok"),
            ("GITHUB_TOKEN", "gh"),
            ("GITHUB_REPO", "acme/website"),
        ])
        .unwrap();
        let github = config.github.unwrap();
        assert_eq!(github.repo, RepoRef::new("acme", "website"));
        assert_eq!(github.projects_path, DEFAULT_PROJECTS_PATH);
        assert_eq!(github.branch, "main");

        assert!(load(&[
            ("JOBBER_ACCESS_TOKEN", "tok"),
            ("GITHUB_TOKEN", "gh"),
            ("GITHUB_REPO", "website"),
        ])
        .is_err());
    }

    #[test]
    fn partial_groups_are_left_unconfigured() {
        let config = load(&[
            ("JOBBER_ACCESS_TOKEN", "tok"),
            ("GMB_ACCESS_TOKEN", "g"),
            ("GMB_ACCOUNT_ID", "1"),
            ("POSTMARK_SERVER_TOKEN", "p"),
        ])
        .unwrap();

        assert!(config.gmb.is_none());
        assert!(config.email.is_none());
    }
}
