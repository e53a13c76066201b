//! Notifications
//!
//! Side-effect pings for proposal activity (views, edits, submissions,
//! approvals) plus the approval email. Everything here is fire-and-forget:
//! failures are logged and never surfaced to the caller or allowed to
//! block the primary action.
//!
//! [`Notifier`] is an injected capability so handlers never reach into
//! ambient state; tests use [`NoopNotifier`].

pub mod events;
pub mod service;

pub use events::{ApprovalEmailRequest, NotificationEvent, NotificationEventType};
pub use service::WebhookNotifier;

use async_trait::async_trait;

/// Outbound notification capability
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an activity event to the notification endpoint
    async fn send_event(&self, event: NotificationEvent);

    /// Request the approval email for an approved proposal
    async fn send_approval_email(&self, request: ApprovalEmailRequest);
}

/// Notifier that drops everything (tests, notifications disabled)
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_event(&self, event: NotificationEvent) {
        tracing::debug!(event_type = ?event.event_type, proposal_id = %event.proposal_id,
            "notification dropped (no endpoint configured)");
    }

    async fn send_approval_email(&self, request: ApprovalEmailRequest) {
        tracing::debug!(proposal_id = %request.proposal_id,
            "approval email dropped (no endpoint configured)");
    }
}
