use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use github_client::{GithubClient, RepoRef};
use serde_json::Value;

use super::{BaseRepositoryPublisher, CommitReceipt};
use crate::config::GithubConfig;
use crate::domains::content::ContentArtifact;

/// Publishes projects into a JSON array file in the website repository.
///
/// The file is read, the project is upserted by slug, and the whole array is
/// written back as one commit. Concurrent writers can race between the read
/// and the write; GitHub rejects the stale write with a conflict.
pub struct GithubRepositoryPublisher {
    client: GithubClient,
    repo: RepoRef,
    path: String,
    branch: String,
}

impl GithubRepositoryPublisher {
    pub fn new(client: GithubClient, repo: RepoRef, path: String, branch: String) -> Self {
        Self {
            client,
            repo,
            path,
            branch,
        }
    }
}

/// Replace the entry with the same slug, or put the new one first.
/// Returns true when an existing entry was replaced.
pub fn upsert_project(entries: &mut Vec<Value>, entry: Value) -> bool {
    let slug = entry.get("slug").and_then(Value::as_str).map(str::to_string);
    let existing = slug.as_deref().and_then(|slug| {
        entries
            .iter()
            .position(|e| e.get("slug").and_then(Value::as_str) == Some(slug))
    });

    match existing {
        Some(index) => {
            entries[index] = entry;
            true
        }
        None => {
            entries.insert(0, entry);
            false
        }
    }
}

/// Parse the collection file. A missing or blank file is an empty collection.
pub fn parse_collection(content: Option<&str>) -> Result<Vec<Value>> {
    match content.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).context("Project collection is not a JSON array"),
    }
}

#[async_trait]
impl BaseRepositoryPublisher for GithubRepositoryPublisher {
    async fn upsert(&self, artifact: &ContentArtifact) -> Result<CommitReceipt> {
        let current = self
            .client
            .get_file(&self.repo, &self.path, &self.branch)
            .await
            .with_context(|| format!("Failed to read {}", self.path))?;

        let mut entries = parse_collection(current.as_ref().map(|f| f.content.as_str()))?;
        let entry = serde_json::to_value(artifact).context("Failed to serialize project")?;
        let replaced = upsert_project(&mut entries, entry);

        let mut content = serde_json::to_string_pretty(&entries)?;
        content.push('\n');

        let verb = if replaced { "Update" } else { "Add" };
        let message = format!("{} project: {}", verb, artifact.title);

        let commit = self
            .client
            .put_file(
                &self.repo,
                &self.path,
                &self.branch,
                &message,
                &content,
                current.as_ref().map(|f| f.sha.as_str()),
            )
            .await
            .with_context(|| format!("Failed to write {}", self.path))?;

        Ok(CommitReceipt {
            committed_ref: commit.sha,
            replaced,
        })
    }
}

/// Stand-in when no GitHub token is configured.
pub struct NoopRepositoryPublisher;

#[async_trait]
impl BaseRepositoryPublisher for NoopRepositoryPublisher {
    async fn upsert(&self, artifact: &ContentArtifact) -> Result<CommitReceipt> {
        anyhow::bail!("GitHub not configured, cannot publish {}", artifact.slug)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub fn create_repository_publisher(config: Option<&GithubConfig>) -> Arc<dyn BaseRepositoryPublisher> {
    match config {
        Some(github) => {
            tracing::info!(
                repo = %format!("{}/{}", github.repo.owner, github.repo.name),
                path = %github.projects_path,
                "Publishing projects to GitHub"
            );
            Arc::new(GithubRepositoryPublisher::new(
                GithubClient::new(github.token.expose().to_string()),
                github.repo.clone(),
                github.projects_path.clone(),
                github.branch.clone(),
            ))
        }
        None => {
            tracing::warn!("GitHub not configured, commitToGithub will be skipped");
            Arc::new(NoopRepositoryPublisher)
        }
    }
}
