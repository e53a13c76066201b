//! Notification payloads
//!
//! Wire shapes consumed by the serverless notification and approval-email
//! endpoints. camelCase, matching the proposal document JSON.

use serde::{Deserialize, Serialize};

use shared::models::Proposal;

/// Proposal activity event type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEventType {
    View,
    Edit,
    ChangesSubmitted,
    Approve,
    Approved,
}

/// Activity event payload for the notification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub event_type: NotificationEventType,
    pub proposal_id: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_type: Option<String>,
    pub total_cost: f64,
    pub event_dates: Vec<String>,
    pub locations: Vec<String>,
}

impl NotificationEvent {
    /// Build an event from the proposal's current document
    pub fn for_proposal(event_type: NotificationEventType, proposal: &Proposal) -> Self {
        Self {
            event_type,
            proposal_id: proposal.id.clone(),
            client_name: proposal.client_name.clone(),
            client_email: proposal.client_email.clone(),
            proposal_type: None,
            total_cost: proposal.data.summary.total_cost,
            event_dates: proposal.data.event_dates.clone(),
            locations: proposal.data.locations.clone(),
        }
    }
}

/// Approval email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEmailRequest {
    pub proposal_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    pub client_name: String,
    pub total_cost: f64,
    pub event_dates: Vec<String>,
}

impl ApprovalEmailRequest {
    pub fn for_proposal(proposal: &Proposal) -> Self {
        Self {
            proposal_id: proposal.id.clone(),
            client_email: proposal.client_email.clone(),
            client_name: proposal.client_name.clone(),
            total_cost: proposal.data.summary.total_cost,
            event_dates: proposal.data.event_dates.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ProposalData, ProposalStatus};

    fn proposal() -> Proposal {
        let mut data = ProposalData {
            client_name: "Acme".to_string(),
            event_dates: vec!["2025-06-01".to_string()],
            locations: vec!["Boston".to_string()],
            ..Default::default()
        };
        data.summary.total_cost = 900.0;
        Proposal {
            id: "p-1".to_string(),
            proposal_group_id: None,
            client_name: "Acme".to_string(),
            client_email: Some("ops@acme.com".to_string()),
            original_data: data.clone(),
            data,
            status: ProposalStatus::Draft,
            pending_review: false,
            has_changes: false,
            change_source: None,
            client_comment: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let event =
            NotificationEvent::for_proposal(NotificationEventType::ChangesSubmitted, &proposal());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "changes_submitted");
        assert_eq!(json["proposalId"], "p-1");
        assert_eq!(json["clientName"], "Acme");
        assert_eq!(json["totalCost"], 900.0);
        assert_eq!(json["eventDates"][0], "2025-06-01");
        assert_eq!(json["locations"][0], "Boston");
    }

    #[test]
    fn test_approval_email_payload() {
        let request = ApprovalEmailRequest::for_proposal(&proposal());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["clientEmail"], "ops@acme.com");
        assert_eq!(json["proposalId"], "p-1");
    }
}
