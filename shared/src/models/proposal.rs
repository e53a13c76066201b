//! Proposal Model
//!
//! The versioned business document being diffed and recalculated, plus the
//! persisted record that wraps it. The document itself (`ProposalData`) is
//! camelCase on the wire; the record uses the datastore's column names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::service::{Appointments, Service};

/// Event dates that are not yet scheduled use this literal in place of an
/// ISO date, in `eventDates` and as a date key in the services map.
pub const TBD_DATE: &str = "TBD";

/// Per-date service list with derived totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateData {
    #[serde(default)]
    pub services: Vec<Service>,

    // -- Derived by recalculation --
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_appointments: Appointments,
}

/// Mapping from date string (ISO date or [`TBD_DATE`]) to [`DateData`]
pub type LocationData = BTreeMap<String, DateData>;

/// Free-form presentation toggles and notes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_note: Option<String>,
    #[serde(default)]
    pub show_service_descriptions: bool,
    #[serde(default)]
    pub show_pricing_breakdown: bool,
    #[serde(default)]
    pub show_discounts: bool,
}

/// Proposal-level derived aggregate
///
/// Always a function of the services tree, never independently
/// authoritative — only the recalculation pass writes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    #[serde(default)]
    pub total_appointments: Appointments,
    #[serde(default)]
    pub total_cost: f64,
    /// What the client pays (equals total cost)
    #[serde(default)]
    pub revenue: f64,
    /// Revenue minus professional payout
    #[serde(default)]
    pub margin: f64,
}

/// The versioned proposal document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalData {
    #[serde(default)]
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    /// Ordered event dates (ISO date or "TBD")
    #[serde(default)]
    pub event_dates: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// location name -> date -> services
    #[serde(default)]
    pub services: BTreeMap<String, LocationData>,
    #[serde(default)]
    pub customization: Customization,
    #[serde(default)]
    pub summary: ProposalSummary,
}

impl ProposalData {
    /// Iterate every service in the tree with its (location, date) context
    pub fn iter_services(&self) -> impl Iterator<Item = (&str, &str, &Service)> {
        self.services.iter().flat_map(|(location, dates)| {
            dates.iter().flat_map(move |(date, date_data)| {
                date_data
                    .services
                    .iter()
                    .map(move |service| (location.as_str(), date.as_str(), service))
            })
        })
    }
}

/// Proposal lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Who last edited the proposal document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    Client,
    Staff,
}

impl ChangeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Staff => "staff",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Self::Client),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

/// Persisted proposal record
///
/// `original_data` is the snapshot diffs are computed against; it is
/// retained until the proposal is approved, at which point it is replaced
/// by the current document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    /// Groups mutually-exclusive proposal options presented together
    pub proposal_group_id: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub data: ProposalData,
    pub original_data: ProposalData,
    pub status: ProposalStatus,
    pub pending_review: bool,
    pub has_changes: bool,
    pub change_source: Option<ChangeSource>,
    pub client_comment: Option<String>,
    pub notes: Option<String>,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create proposal payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProposalCreate {
    #[validate(length(min = 1, message = "client_name is required"))]
    pub client_name: String,
    #[validate(email)]
    pub client_email: Option<String>,
    pub proposal_group_id: Option<String>,
    pub notes: Option<String>,
    pub data: ProposalData,
}

/// Staff edit payload — replaces the working document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDataUpdate {
    pub data: ProposalData,
    pub notes: Option<String>,
}

/// View-tracking payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewEvent {
    #[validate(email)]
    pub viewer_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::ServiceType;

    fn sample_data() -> ProposalData {
        let mut data = ProposalData {
            client_name: "Acme".to_string(),
            event_dates: vec!["2025-06-01".to_string()],
            locations: vec!["Boston".to_string()],
            ..Default::default()
        };
        let mut dates = LocationData::new();
        dates.insert(
            "2025-06-01".to_string(),
            DateData {
                services: vec![Service::new(ServiceType::Massage)],
                ..Default::default()
            },
        );
        data.services.insert("Boston".to_string(), dates);
        data
    }

    #[test]
    fn test_iter_services_yields_context() {
        let data = sample_data();
        let all: Vec<_> = data.iter_services().collect();
        assert_eq!(all.len(), 1);
        let (location, date, service) = all[0];
        assert_eq!(location, "Boston");
        assert_eq!(date, "2025-06-01");
        assert_eq!(service.service_type, ServiceType::Massage);
    }

    #[test]
    fn test_proposal_data_wire_shape() {
        let data = sample_data();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["clientName"], "Acme");
        assert!(json["services"]["Boston"]["2025-06-01"]["services"].is_array());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            ProposalStatus::Draft,
            ProposalStatus::Pending,
            ProposalStatus::Approved,
            ProposalStatus::Rejected,
        ] {
            assert_eq!(ProposalStatus::parse_str(status.as_str()), Some(status));
        }
        assert_eq!(ProposalStatus::parse_str("archived"), None);
    }

    #[test]
    fn test_create_payload_validation() {
        let valid = ProposalCreate {
            client_name: "Acme".to_string(),
            client_email: Some("ops@acme.com".to_string()),
            proposal_group_id: None,
            notes: None,
            data: ProposalData::default(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ProposalCreate {
            client_name: String::new(),
            client_email: Some("not-an-email".to_string()),
            proposal_group_id: None,
            notes: None,
            data: ProposalData::default(),
        };
        assert!(invalid.validate().is_err());
    }
}
