//! Jobber webhook handler.
//!
//! Jobber posts an event whenever a job or visit changes. Job and visit
//! events start a pipeline run in the background; everything else is
//! acknowledged and dropped.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde::Deserialize;

use crate::domains::jobs::JobReference;
use crate::domains::pipeline::PipelineRunner;

/// State shared with the webhook handler.
#[derive(Clone)]
pub struct WebhookState {
    pub runner: PipelineRunner,
}

/// Jobber webhook payload.
/// See: https://developer.getjobber.com/docs/using_jobbers_api/setting_up_webhooks
#[derive(Debug, Deserialize)]
pub struct JobberWebhookPayload {
    pub data: JobberWebhookData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobberWebhookData {
    pub web_hook_event: JobberWebhookEvent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobberWebhookEvent {
    pub topic: String,
    pub item_id: String,
    pub account_id: Option<String>,
    pub occurred_at: Option<String>,
}

/// Build the axum router for webhook endpoints.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhooks/jobber", post(handle_jobber_webhook))
        .with_state(state)
}

/// Which run, if any, an event should start.
pub fn reference_for_event(topic: &str, item_id: &str) -> Option<JobReference> {
    let topic = topic.trim().to_ascii_uppercase();
    let job_id = topic.starts_with("JOB_").then_some(item_id);
    let visit_id = topic.starts_with("VISIT_").then_some(item_id);
    JobReference::from_parts(job_id, visit_id).ok()
}

/// Handle a webhook event from Jobber.
///
/// Returns 200 as soon as the event is understood; the run itself happens on
/// a spawned task and its outcome is logged and kept in run history.
async fn handle_jobber_webhook(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let payload: JobberWebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed Jobber webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    let event = payload.data.web_hook_event;
    let Some(job_ref) = reference_for_event(&event.topic, &event.item_id) else {
        tracing::debug!(topic = %event.topic, item_id = %event.item_id, "Ignoring Jobber webhook topic");
        return StatusCode::OK;
    };

    tracing::info!(
        topic = %event.topic,
        item_id = %event.item_id,
        account_id = ?event.account_id,
        occurred_at = ?event.occurred_at,
        "Jobber webhook accepted"
    );

    tokio::spawn(async move {
        let record = state.runner.run(&job_ref).await;
        if record.overall_success {
            tracing::info!(job_ref = %job_ref, summary = %record.summary, "Webhook run finished");
        } else {
            tracing::error!(job_ref = %job_ref, summary = %record.summary, "Webhook run finished with failures");
        }
    });

    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_topics_start_job_runs() {
        assert_eq!(
            reference_for_event("JOB_UPDATE", "Z2lk"),
            Some(JobReference::Job("Z2lk".into()))
        );
        assert_eq!(
            reference_for_event("job_create", "Z2lk"),
            Some(JobReference::Job("Z2lk".into()))
        );
    }

    #[test]
    fn test_visit_topics_start_visit_runs() {
        assert_eq!(
            reference_for_event("VISIT_COMPLETE", "dmlz"),
            Some(JobReference::Visit("dmlz".into()))
        );
    }

    #[test]
    fn test_other_topics_and_blank_ids_are_ignored() {
        assert_eq!(reference_for_event("CLIENT_CREATE", "abc"), None);
        assert_eq!(reference_for_event("INVOICE_UPDATE", "abc"), None);
        assert_eq!(reference_for_event("JOB_UPDATE", "  "), None);
    }

    #[test]
    fn test_parses_jobber_payload() {
        let payload: JobberWebhookPayload = serde_json::from_str(
            r#"{"data":{"webHookEvent":{"topic":"VISIT_COMPLETE","appId":"app","accountId":"acc","itemId":"dmlz","occurredAt":"2024-05-01T12:00:00Z"}}}"#,
        )
        .unwrap();

        assert_eq!(payload.data.web_hook_event.topic, "VISIT_COMPLETE");
        assert_eq!(payload.data.web_hook_event.item_id, "dmlz");
        assert_eq!(payload.data.web_hook_event.account_id.as_deref(), Some("acc"));
    }
}
