//! Error types for the GitHub client.

use thiserror::Error;

/// Result type for GitHub client operations.
pub type Result<T> = std::result::Result<T, GithubError>;

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The write was rejected because the file changed since it was read
    #[error("conflict writing {path}: file changed since it was read")]
    Conflict { path: String },

    /// File content was not valid base64 or UTF-8
    #[error("could not decode content of {path}: {reason}")]
    Decode { path: String, reason: String },
}
