//! WebhookNotifier — HTTP client for the notification and email endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use shared::error::AppError;

use super::events::{ApprovalEmailRequest, NotificationEvent};
use super::Notifier;

/// Reqwest-backed notifier posting JSON to the configured endpoints
pub struct WebhookNotifier {
    client: Client,
    /// Activity notification endpoint (e.g. a Slack-forwarding function)
    notify_url: Option<String>,
    /// Approval email endpoint
    email_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(
        notify_url: Option<String>,
        email_url: Option<String>,
        timeout_ms: u64,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            notify_url,
            email_url,
        })
    }

    /// POST a JSON payload; non-2xx and transport errors are logged only
    async fn post<T: Serialize>(&self, url: &str, what: &str, payload: &T) {
        match self.client.post(url).json(payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(url, "{what} delivered");
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(url, %status, body = %body, "{what} rejected by endpoint");
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "{what} delivery failed");
            }
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_event(&self, event: NotificationEvent) {
        let Some(url) = self.notify_url.as_deref() else {
            tracing::debug!(event_type = ?event.event_type, "notification skipped, no endpoint");
            return;
        };
        self.post(url, "notification", &event).await;
    }

    async fn send_approval_email(&self, request: ApprovalEmailRequest) {
        let Some(url) = self.email_url.as_deref() else {
            tracing::debug!(proposal_id = %request.proposal_id, "approval email skipped, no endpoint");
            return;
        };
        self.post(url, "approval email", &request).await;
    }
}
