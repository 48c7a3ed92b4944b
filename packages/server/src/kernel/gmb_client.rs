use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BaseSocialPublisher;
use crate::common::Credential;
use crate::config::GmbConfig;
use crate::domains::content::SocialPost;

const BASE_URL: &str = "https://mybusiness.googleapis.com/v4";

/// Google Business Profile local posts client
pub struct GoogleBusinessPublisher {
    access_token: Credential,
    account_id: String,
    location_id: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalPostRequest<'a> {
    language_code: &'a str,
    summary: &'a str,
    topic_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    call_to_action: Option<CallToAction<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<MediaItem<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CallToAction<'a> {
    action_type: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MediaItem<'a> {
    media_format: &'a str,
    source_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct LocalPostResponse {
    /// Resource name: accounts/{a}/locations/{l}/localPosts/{id}
    name: String,
}

fn local_post_request(post: &SocialPost) -> LocalPostRequest<'_> {
    LocalPostRequest {
        language_code: "en-US",
        summary: &post.summary,
        topic_type: "STANDARD",
        call_to_action: post.link.as_deref().map(|url| CallToAction {
            action_type: "LEARN_MORE",
            url,
        }),
        media: post
            .photo_url
            .as_deref()
            .map(|source_url| MediaItem {
                media_format: "PHOTO",
                source_url,
            })
            .into_iter()
            .collect(),
    }
}

impl GoogleBusinessPublisher {
    pub fn new(access_token: Credential, account_id: String, location_id: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            access_token,
            account_id,
            location_id,
            client,
        })
    }
}

#[async_trait]
impl BaseSocialPublisher for GoogleBusinessPublisher {
    async fn post(&self, post: &SocialPost) -> Result<String> {
        let url = format!(
            "{}/accounts/{}/locations/{}/localPosts",
            BASE_URL, self.account_id, self.location_id
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(self.access_token.expose())
            .json(&local_post_request(post))
            .send()
            .await
            .context("Failed to send GMB local post request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GMB API error {}: {}", status, body);
        }

        let created: LocalPostResponse = response
            .json()
            .await
            .context("Failed to parse GMB response")?;

        Ok(created
            .name
            .rsplit('/')
            .next()
            .unwrap_or(&created.name)
            .to_string())
    }
}

/// No-op publisher when GMB credentials are not configured
pub struct NoopSocialPublisher;

#[async_trait]
impl BaseSocialPublisher for NoopSocialPublisher {
    async fn post(&self, _post: &SocialPost) -> Result<String> {
        anyhow::bail!("GMB not configured")
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub fn create_social_publisher(config: Option<&GmbConfig>) -> Result<Arc<dyn BaseSocialPublisher>> {
    match config {
        Some(gmb) => {
            tracing::info!(location_id = %gmb.location_id, "GMB posting enabled");
            Ok(Arc::new(GoogleBusinessPublisher::new(
                Credential::new(gmb.access_token.expose()),
                gmb.account_id.clone(),
                gmb.location_id.clone(),
            )?))
        }
        None => {
            tracing::warn!("GMB not configured, postToGMB will be skipped");
            Ok(Arc::new(NoopSocialPublisher))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_includes_link_and_photo() {
        let post = SocialPost {
            summary: "Roof Repair in Austin".into(),
            link: Some("https://example.com/projects/roof".into()),
            photo_url: Some("https://cdn.example/1.jpg".into()),
        };

        let body = serde_json::to_value(local_post_request(&post)).unwrap();

        assert_eq!(body["topicType"], "STANDARD");
        assert_eq!(body["callToAction"]["actionType"], "LEARN_MORE");
        assert_eq!(body["callToAction"]["url"], "https://example.com/projects/roof");
        assert_eq!(body["media"][0]["sourceUrl"], "https://cdn.example/1.jpg");
    }

    #[test]
    fn request_omits_missing_link_and_photo() {
        let post = SocialPost {
            summary: "Roof Repair in Austin".into(),
            link: None,
            photo_url: None,
        };

        let body = serde_json::to_value(local_post_request(&post)).unwrap();

        assert!(body.get("callToAction").is_none());
        assert!(body.get("media").is_none());
    }
}
