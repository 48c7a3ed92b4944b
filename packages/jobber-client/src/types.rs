use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GraphQL request body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// GraphQL response envelope. Jobber returns 200 with `errors` for most
/// query-level failures.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorItem {
    pub message: String,
}

/// Relay-style connection; only the nodes are queried.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobData {
    pub job: Option<JobNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitData {
    pub visit: Option<VisitNode>,
}

/// A job as returned by the showcase job query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobNode {
    pub id: String,
    pub job_number: Option<i64>,
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub client: Option<ClientNode>,
    pub property: Option<PropertyNode>,
    #[serde(default)]
    pub line_items: Connection<LineItemNode>,
    #[serde(default)]
    pub notes: Connection<NoteNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitNode {
    pub id: String,
    pub job: Option<VisitJobRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitJobRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientNode {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyNode {
    pub address: Option<AddressNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressNode {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemNode {
    pub name: String,
    pub description: Option<String>,
    pub quantity: Option<f64>,
}

/// Job note. Photos taken in the field arrive as note attachments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteNode {
    pub message: Option<String>,
    #[serde(default)]
    pub file_attachments: Connection<FileAttachmentNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachmentNode {
    pub id: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub url: String,
}
