use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BaseNotificationSender;
use crate::common::Credential;
use crate::config::EmailConfig;

const SEND_URL: &str = "https://api.postmarkapp.com/email";

/// Postmark API client for internal notification email
pub struct PostmarkEmailSender {
    server_token: Credential,
    from: String,
    to: String,
    client: reqwest::Client,
}

/// Postmark API request
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

/// Postmark API response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkResponse {
    #[serde(rename = "MessageID")]
    message_id: Option<String>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

impl PostmarkEmailSender {
    pub fn new(server_token: Credential, from: String, to: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            server_token,
            from,
            to,
            client,
        })
    }
}

#[async_trait]
impl BaseNotificationSender for PostmarkEmailSender {
    async fn send(&self, subject: &str, body: &str) -> Result<String> {
        let request = PostmarkRequest {
            from: &self.from,
            to: &self.to,
            subject,
            text_body: body,
            message_stream: "outbound",
        };

        let response = self
            .client
            .post(SEND_URL)
            .header("X-Postmark-Server-Token", self.server_token.expose())
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send Postmark request")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Postmark API error {}: {}", status, body);
        }

        let sent: PostmarkResponse =
            serde_json::from_str(&body).context("Failed to parse Postmark response")?;
        accepted_message_id(sent)
    }
}

/// Postmark can answer 200 with a non-zero error code.
fn accepted_message_id(response: PostmarkResponse) -> Result<String> {
    if response.error_code != 0 {
        anyhow::bail!(
            "Postmark rejected message ({}): {}",
            response.error_code,
            response.message
        );
    }
    response
        .message_id
        .context("Postmark response missing MessageID")
}

/// No-op sender when Postmark is not configured
pub struct NoopNotificationSender;

#[async_trait]
impl BaseNotificationSender for NoopNotificationSender {
    async fn send(&self, subject: &str, _body: &str) -> Result<String> {
        anyhow::bail!("Email not configured, dropping \"{}\"", subject)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub fn create_notification_sender(config: Option<&EmailConfig>) -> Result<Arc<dyn BaseNotificationSender>> {
    match config {
        Some(email) => {
            tracing::info!(to = %email.to, "Social drafts will be emailed via Postmark");
            Ok(Arc::new(PostmarkEmailSender::new(
                Credential::new(email.server_token.expose()),
                email.from.clone(),
                email.to.clone(),
            )?))
        }
        None => {
            tracing::warn!("Postmark not configured, emailSocialDrafts will be skipped");
            Ok(Arc::new(NoopNotificationSender))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_postmark_field_names() {
        let request = PostmarkRequest {
            from: "bot@example.com",
            to: "owner@example.com",
            subject: "Drafts",
            text_body: "Body",
            message_stream: "outbound",
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["From"], "bot@example.com");
        assert_eq!(body["TextBody"], "Body");
        assert_eq!(body["MessageStream"], "outbound");
    }

    #[test]
    fn error_code_in_ok_response_is_a_failure() {
        let ok: PostmarkResponse =
            serde_json::from_str(r#"{"MessageID":"abc","ErrorCode":0,"Message":"OK"}"#).unwrap();
        assert_eq!(accepted_message_id(ok).unwrap(), "abc");

        let rejected: PostmarkResponse =
            serde_json::from_str(r#"{"ErrorCode":406,"Message":"Inactive recipient"}"#).unwrap();
        let err = accepted_message_id(rejected).unwrap_err();
        assert!(err.to_string().contains("Inactive recipient"));
    }
}
