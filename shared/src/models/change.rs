//! Change Tracking Model
//!
//! A `ProposalChange` records one detected field-level difference between
//! the retained proposal snapshot and an edited document. Changes are
//! immutable once created — they capture a point-in-time diff, not a live
//! binding. A `ProposalChangeSet` bundles the changes of one
//! edit-and-submit action together with the submitter's comment.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::proposal::ProposalData;

/// Kind of difference detected for a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Remove,
    Update,
}

/// Review status of a change or change set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Identity stamped onto every change produced by one submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submitter {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

/// One detected field-level difference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalChange {
    pub id: String,
    /// Dotted path into the ProposalData tree,
    /// e.g. `services.Boston.2025-06-01.services.0.numPros`
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    pub change_type: ChangeType,
    /// Unix millis
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub status: ChangeStatus,
}

impl ProposalChange {
    /// Build a change for `field`, deriving the change type from which side
    /// is absent: no old value ⇒ add, no new value ⇒ remove, both ⇒ update.
    pub fn new(
        field: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
        submitter: &Submitter,
    ) -> Self {
        let change_type = match (&old_value, &new_value) {
            (None, _) => ChangeType::Add,
            (_, None) => ChangeType::Remove,
            _ => ChangeType::Update,
        };
        Self {
            id: Uuid::new_v4().to_string(),
            field: field.into(),
            old_value,
            new_value,
            change_type,
            timestamp: Utc::now().timestamp_millis(),
            client_email: submitter.client_email.clone(),
            client_name: submitter.client_name.clone(),
            status: ChangeStatus::Pending,
        }
    }
}

/// A named, timestamped bundle of changes from one edit-and-submit action
///
/// Owned by the proposal it was generated against; never mutated after
/// creation except for the review status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalChangeSet {
    pub id: String,
    pub proposal_id: String,
    pub changes: Vec<ProposalChange>,
    pub comment: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub status: ChangeStatus,
    /// Unix millis
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
}

/// Client change submission payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeSubmission {
    /// The edited document (diffed against the retained snapshot)
    pub data: ProposalData,
    pub comment: Option<String>,
    pub client_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
}

/// Staff review decision for a pending change set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub approve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_type_derived_from_absent_sides() {
        let submitter = Submitter::default();

        let added = ProposalChange::new("clientEmail", None, Some(json!("a@b.com")), &submitter);
        assert_eq!(added.change_type, ChangeType::Add);
        assert!(added.old_value.is_none());

        let removed = ProposalChange::new("clientEmail", Some(json!("a@b.com")), None, &submitter);
        assert_eq!(removed.change_type, ChangeType::Remove);
        assert!(removed.new_value.is_none());

        let updated = ProposalChange::new(
            "clientName",
            Some(json!("Acme")),
            Some(json!("Acme Corp")),
            &submitter,
        );
        assert_eq!(updated.change_type, ChangeType::Update);
        assert_eq!(updated.status, ChangeStatus::Pending);
    }

    #[test]
    fn test_changes_get_unique_ids() {
        let submitter = Submitter::default();
        let a = ProposalChange::new("clientName", None, Some(json!("x")), &submitter);
        let b = ProposalChange::new("clientName", None, Some(json!("x")), &submitter);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_submitter_stamped_onto_change() {
        let submitter = Submitter {
            client_name: Some("Dana".to_string()),
            client_email: Some("dana@acme.com".to_string()),
        };
        let change = ProposalChange::new("clientName", Some(json!("a")), Some(json!("b")), &submitter);
        assert_eq!(change.client_name.as_deref(), Some("Dana"));
        assert_eq!(change.client_email.as_deref(), Some("dana@acme.com"));
    }
}
