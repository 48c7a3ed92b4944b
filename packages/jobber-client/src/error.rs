//! Error types for the Jobber client.

use thiserror::Error;

/// Result type for Jobber client operations.
pub type Result<T> = std::result::Result<T, JobberError>;

/// Jobber client errors.
#[derive(Debug, Error)]
pub enum JobberError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Access token rejected (expired or revoked)
    #[error("access token rejected by Jobber")]
    Unauthorized,

    /// Non-2xx response
    #[error("Jobber API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// GraphQL-level errors returned with a 200 response
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// Query succeeded but the record does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}
