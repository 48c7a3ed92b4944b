//! Normalized job data as seen by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::pipeline::PipelineError;

/// The unit of work a pipeline run is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum JobReference {
    Job(String),
    Visit(String),
}

impl JobReference {
    /// Build a reference from the two optional id forms.
    ///
    /// Blank ids count as absent. A job id wins when both are given.
    pub fn from_parts(
        job_id: Option<&str>,
        visit_id: Option<&str>,
    ) -> Result<Self, PipelineError> {
        let non_blank = |id: Option<&str>| {
            id.map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };

        match (non_blank(job_id), non_blank(visit_id)) {
            (Some(job_id), _) => Ok(Self::Job(job_id)),
            (None, Some(visit_id)) => Ok(Self::Visit(visit_id)),
            (None, None) => Err(PipelineError::MissingJobReference),
        }
    }

    /// The raw identifier, whichever form it is.
    pub fn id(&self) -> &str {
        match self {
            Self::Job(id) | Self::Visit(id) => id,
        }
    }
}

impl std::fmt::Display for JobReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Job(id) => write!(f, "job {}", id),
            Self::Visit(id) => write!(f, "visit {}", id),
        }
    }
}

/// A completed job, normalized from the field-service platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub job_number: Option<i64>,
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub notes: Vec<String>,
    pub photos: Vec<PhotoRef>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub description: Option<String>,
    pub quantity: Option<f64>,
}

impl LineItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            quantity: None,
        }
    }
}

/// Reference to a raw photo attached to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub id: String,
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl PhotoRef {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            file_name: None,
            content_type: None,
        }
    }

    /// Attachments without a content type are assumed to be images.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(true)
    }
}

impl From<jobber_client::JobNode> for JobRecord {
    fn from(node: jobber_client::JobNode) -> Self {
        let address = node
            .property
            .and_then(|p| p.address)
            .map(|a| Address {
                street: a.street,
                city: a.city,
                province: a.province,
                postal_code: a.postal_code,
            })
            .unwrap_or_default();

        let line_items = node
            .line_items
            .nodes
            .into_iter()
            .map(|item| LineItem {
                name: item.name,
                description: item.description,
                quantity: item.quantity,
            })
            .collect();

        let mut notes = Vec::new();
        let mut photos = Vec::new();
        if let Some(instructions) = node.instructions {
            notes.push(instructions);
        }
        for note in node.notes.nodes {
            if let Some(message) = note.message {
                notes.push(message);
            }
            photos.extend(note.file_attachments.nodes.into_iter().map(|file| PhotoRef {
                id: file.id,
                url: file.url,
                file_name: file.file_name,
                content_type: file.content_type,
            }));
        }

        Self {
            id: node.id,
            job_number: node.job_number,
            title: node.title,
            client_name: node.client.and_then(|c| c.name),
            address,
            line_items,
            notes,
            photos,
            completed_at: node.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_wins_over_visit_id() {
        let reference = JobReference::from_parts(Some("j1"), Some("v1")).unwrap();
        assert_eq!(reference, JobReference::Job("j1".into()));
    }

    #[test]
    fn falls_back_to_visit_id() {
        let reference = JobReference::from_parts(None, Some(" v1 ")).unwrap();
        assert_eq!(reference, JobReference::Visit("v1".into()));
        assert_eq!(reference.id(), "v1");
    }

    #[test]
    fn blank_ids_are_missing() {
        assert!(matches!(
            JobReference::from_parts(Some("  "), None),
            Err(PipelineError::MissingJobReference)
        ));
        assert!(matches!(
            JobReference::from_parts(None, None),
            Err(PipelineError::MissingJobReference)
        ));
    }

    #[test]
    fn photo_content_type_filter() {
        let mut photo = PhotoRef::new("p1", "https://files.example/p1");
        assert!(photo.is_image());

        photo.content_type = Some("IMAGE/JPEG".into());
        assert!(photo.is_image());

        photo.content_type = Some("application/pdf".into());
        assert!(!photo.is_image());
    }
}
