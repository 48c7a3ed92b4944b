//! Pure Jobber GraphQL API client.
//!
//! A minimal client for the Jobber platform API. Supports fetching a job with
//! the fields needed to showcase completed work (address, line items, notes and
//! photo attachments), and resolving a visit to its parent job.
//!
//! The access token is passed per call; token issuance and refresh belong to
//! the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use jobber_client::JobberClient;
//!
//! let client = JobberClient::new();
//! let job = client.fetch_job(&token, "Z2lkOi8vSm9iYmVyL0pvYi8xMjM=").await?;
//! println!("{}", job.title.as_deref().unwrap_or("(untitled)"));
//! ```

pub mod error;
pub mod types;

pub use error::{JobberError, Result};
pub use types::{
    AddressNode, ClientNode, FileAttachmentNode, JobNode, LineItemNode, NoteNode, PropertyNode,
    VisitNode,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::{GraphQLRequest, GraphQLResponse, JobData, VisitData};

const BASE_URL: &str = "https://api.getjobber.com/api/graphql";

/// Jobber requires a pinned schema version on every request.
const GRAPHQL_VERSION: &str = "2024-06-10";

const JOB_QUERY: &str = r#"
query ShowcaseJob($id: EncodedId!) {
  job(id: $id) {
    id
    jobNumber
    title
    instructions
    completedAt
    client { name }
    property { address { street city province postalCode } }
    lineItems(first: 50) { nodes { name description quantity } }
    notes(first: 50) {
      nodes {
        ... on JobNote {
          message
          fileAttachments { nodes { id fileName contentType url } }
        }
      }
    }
  }
}
"#;

const VISIT_QUERY: &str = r#"
query ShowcaseVisit($id: EncodedId!) {
  visit(id: $id) {
    id
    job { id }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct JobberClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for JobberClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JobberClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different GraphQL endpoint (staging, local fake).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch a job with its line items, notes and photo attachments.
    pub async fn fetch_job(&self, access_token: &str, job_id: &str) -> Result<JobNode> {
        let data: JobData = self
            .query(access_token, JOB_QUERY, serde_json::json!({ "id": job_id }))
            .await?;

        data.job.ok_or_else(|| JobberError::NotFound {
            kind: "job",
            id: job_id.to_string(),
        })
    }

    pub async fn fetch_visit(&self, access_token: &str, visit_id: &str) -> Result<VisitNode> {
        let data: VisitData = self
            .query(access_token, VISIT_QUERY, serde_json::json!({ "id": visit_id }))
            .await?;

        data.visit.ok_or_else(|| JobberError::NotFound {
            kind: "visit",
            id: visit_id.to_string(),
        })
    }

    /// Resolve a visit to its parent job and fetch the full job.
    pub async fn fetch_job_for_visit(&self, access_token: &str, visit_id: &str) -> Result<JobNode> {
        let visit = self.fetch_visit(access_token, visit_id).await?;
        let job_ref = visit.job.ok_or_else(|| JobberError::NotFound {
            kind: "job for visit",
            id: visit_id.to_string(),
        })?;

        tracing::debug!(visit_id, job_id = %job_ref.id, "Resolved visit to job");
        self.fetch_job(access_token, &job_ref.id).await
    }

    async fn query<T: DeserializeOwned>(
        &self,
        access_token: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let resp = self
            .client
            .post(&self.base_url)
            .bearer_auth(access_token)
            .header("X-JOBBER-GRAPHQL-VERSION", GRAPHQL_VERSION)
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(JobberError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(JobberError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: GraphQLResponse<T> = resp.json().await?;
        into_data(envelope)
    }
}

/// Unwrap a GraphQL envelope, surfacing query errors.
fn into_data<T>(envelope: GraphQLResponse<T>) -> Result<T> {
    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(JobberError::GraphQL(messages.join("; ")));
    }

    envelope
        .data
        .ok_or_else(|| JobberError::GraphQL("response contained no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_with_photo_attachments() {
        let body = serde_json::json!({
            "data": {
                "job": {
                    "id": "job-1",
                    "jobNumber": 42,
                    "title": "Gutter cleaning",
                    "instructions": null,
                    "completedAt": "2024-05-01T15:30:00Z",
                    "client": { "name": "Pat Doe" },
                    "property": { "address": {
                        "street": "1 Main St", "city": "Denver",
                        "province": "CO", "postalCode": "80202"
                    }},
                    "lineItems": { "nodes": [
                        { "name": "Gutter Cleaning", "description": "Full home", "quantity": 1.0 }
                    ]},
                    "notes": { "nodes": [
                        { "message": "Downspouts flushed", "fileAttachments": { "nodes": [
                            { "id": "a1", "fileName": "before.jpg", "contentType": "image/jpeg",
                              "url": "https://files.example/a1" }
                        ]}},
                        {}
                    ]}
                }
            }
        });

        let envelope: GraphQLResponse<JobData> = serde_json::from_value(body).unwrap();
        let job = into_data(envelope).unwrap().job.unwrap();

        assert_eq!(job.job_number, Some(42));
        assert_eq!(
            job.property.and_then(|p| p.address).and_then(|a| a.city),
            Some("Denver".to_string())
        );
        assert_eq!(job.line_items.nodes.len(), 1);
        assert_eq!(job.notes.nodes.len(), 2);
        assert_eq!(job.notes.nodes[0].file_attachments.nodes[0].id, "a1");
        assert!(job.notes.nodes[1].file_attachments.nodes.is_empty());
    }

    #[test]
    fn connections_without_nodes_parse_as_empty() {
        let body = serde_json::json!({
            "data": {
                "job": {
                    "id": "job-2",
                    "lineItems": {},
                    "notes": { "nodes": [{ "message": "No photos", "fileAttachments": {} }] }
                }
            }
        });

        let envelope: GraphQLResponse<JobData> = serde_json::from_value(body).unwrap();
        let job = into_data(envelope).unwrap().job.unwrap();

        assert!(job.line_items.nodes.is_empty());
        assert_eq!(job.notes.nodes.len(), 1);
        assert!(job.notes.nodes[0].file_attachments.nodes.is_empty());
    }

    #[test]
    fn graphql_errors_take_precedence_over_data() {
        let body = serde_json::json!({
            "data": { "job": null },
            "errors": [{ "message": "Throttled" }, { "message": "Try later" }]
        });

        let envelope: GraphQLResponse<JobData> = serde_json::from_value(body).unwrap();
        let err = into_data(envelope).unwrap_err();

        assert_eq!(err.to_string(), "GraphQL error: Throttled; Try later");
    }

    #[test]
    fn missing_data_is_an_error() {
        let envelope: GraphQLResponse<JobData> =
            serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(matches!(into_data(envelope), Err(JobberError::GraphQL(_))));
    }
}
