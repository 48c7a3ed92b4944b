//! Pure GitHub contents REST API client.
//!
//! Reads and writes single files through the contents API. Each write is a
//! commit; the blob sha from the read must be passed back so GitHub can reject
//! writes based on a stale read.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_client::{GithubClient, RepoRef};
//!
//! let client = GithubClient::new(token);
//! let repo = RepoRef::new("acme", "website");
//! let file = client.get_file(&repo, "data/projects.json", "main").await?;
//! let commit = client
//!     .put_file(&repo, "data/projects.json", "main", "Update projects", "[]", file.as_ref().map(|f| f.sha.as_str()))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GithubError, Result};
pub use types::{CommitInfo, RepoFile, RepoRef};

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use types::{ContentsResponse, PutContentsRequest, PutContentsResponse};

const BASE_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "showcase-pipeline";

pub struct GithubClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(token: String, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            token,
            base_url: base_url.into(),
        }
    }

    fn contents_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            repo.owner,
            repo.name,
            path.trim_start_matches('/')
        )
    }

    /// Read a file. Returns `None` when the file does not exist yet.
    pub async fn get_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
    ) -> Result<Option<RepoFile>> {
        let resp = self
            .client
            .get(self.contents_url(repo, path))
            .query(&[("ref", branch)])
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path, branch, "File not found, treating as empty");
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let contents: ContentsResponse = resp.json().await?;
        let content = decode_content(path, &contents)?;

        Ok(Some(RepoFile {
            path: path.to_string(),
            sha: contents.sha,
            content,
        }))
    }

    /// Create or replace a file in a single commit. Pass the sha from
    /// [`get_file`](Self::get_file) when replacing.
    pub async fn put_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<CommitInfo> {
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            sha,
            branch,
        };

        let resp = self
            .client
            .put(self.contents_url(repo, path))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::CONFLICT {
            return Err(GithubError::Conflict {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let put: PutContentsResponse = resp.json().await?;
        tracing::info!(path, branch, commit = %put.commit.sha, "Committed file");
        Ok(put.commit)
    }
}

/// GitHub wraps base64 content at 60 columns; strip the newlines before decoding.
fn decode_content(path: &str, contents: &ContentsResponse) -> Result<String> {
    if let Some(encoding) = contents.encoding.as_deref() {
        if encoding != "base64" {
            return Err(GithubError::Decode {
                path: path.to_string(),
                reason: format!("unsupported encoding {}", encoding),
            });
        }
    }

    let compact: String = contents
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let bytes = STANDARD.decode(compact).map_err(|e| GithubError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| GithubError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
