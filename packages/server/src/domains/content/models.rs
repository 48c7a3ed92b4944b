use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::jobs::PhotoRef;

/// Structured content pulled out of a job record, augmented during the run
/// with processed photo results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentData {
    pub job_id: String,
    pub job_number: Option<i64>,
    pub city: String,
    pub province: Option<String>,
    pub service: String,
    pub services: Vec<String>,
    pub description: String,
    pub notes: Vec<String>,
    pub photos: Vec<PhotoRef>,
    pub processed_photos: Vec<ProcessedPhoto>,
}

impl ContentData {
    pub fn successful_photos(&self) -> impl Iterator<Item = &ProcessedPhoto> {
        self.processed_photos.iter().filter(|p| p.processed)
    }

    pub fn successful_photo_count(&self) -> usize {
        self.successful_photos().count()
    }
}

/// Outcome of processing one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPhoto {
    pub source_id: String,
    pub processed: bool,
    pub external_id: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl ProcessedPhoto {
    pub fn success(
        source_id: impl Into<String>,
        external_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            processed: true,
            external_id: Some(external_id.into()),
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn failure(source_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            processed: false,
            external_id: None,
            url: None,
            error: Some(error.into()),
        }
    }
}

/// Page-ready project content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentArtifact {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub city: String,
    pub service: String,
    pub page_url: Option<String>,
    pub media: Vec<MediaItem>,
    pub structured_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    Story,
    Quick,
}

/// A social caption draft for manual posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub style: CaptionStyle,
    pub text: String,
    pub hashtags: Vec<String>,
}

impl Caption {
    /// Caption text followed by its hashtags on one line.
    pub fn render(&self) -> String {
        if self.hashtags.is_empty() {
            self.text.clone()
        } else {
            format!("{}\n\n{}", self.text, self.hashtags.join(" "))
        }
    }
}

/// Short promotional post for the business profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub summary: String,
    pub link: Option<String>,
    pub photo_url: Option<String>,
}

/// Internal notification carrying caption drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}
