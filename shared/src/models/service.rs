//! Service Model
//!
//! A service is one billable line item within a proposal (e.g. 2 hours of
//! chair massage with 3 professionals on a given date at a given location).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Service type enum — drives display name, description, and pricing basis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Massage,
    Hair,
    Nails,
    Headshot,
    Mindfulness,
}

impl ServiceType {
    /// Reviewer-facing display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Massage => "Massage",
            Self::Hair => "Hair Styling",
            Self::Nails => "Nail Care",
            Self::Headshot => "Professional Headshots",
            Self::Mindfulness => "Mindfulness Session",
        }
    }

    /// Short marketing description used in rendered documents
    pub fn description(&self) -> &'static str {
        match self {
            Self::Massage => "On-site massage with licensed therapists",
            Self::Hair => "Professional styling and touch-ups",
            Self::Nails => "Manicure services with licensed technicians",
            Self::Headshot => "Studio-quality headshots with instant retouching",
            Self::Mindfulness => "Guided group sessions led by certified instructors",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Massage delivery format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MassageType {
    Chair,
    Table,
}

/// Mindfulness session format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MindfulnessType {
    Intro,
    Meditation,
    Breathwork,
}

/// Cadence of a recurring service engagement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringCadence {
    Weekly,
    Biweekly,
    Monthly,
}

/// Recurring engagement descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringFrequency {
    pub cadence: RecurringCadence,
    /// Number of occurrences booked (drives the recurring discount tier)
    pub occurrences: u32,
}

/// Appointment capacity for a service, date, or proposal
///
/// The persisted shape uses a sentinel: numeric `0` or the string
/// `"unlimited"` both mean "no numeric cap" and must render as `"∞"`,
/// never as the numeral 0. Serializes back to `0` for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appointments {
    Count(u32),
    Unlimited,
}

impl Appointments {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited) || matches!(self, Self::Count(0))
    }

    /// Saturating rollup addition — unlimited absorbs
    pub fn plus(self, other: Appointments) -> Appointments {
        match (self, other) {
            (Self::Count(a), Self::Count(b)) => Self::Count(a.saturating_add(b)),
            _ => Self::Unlimited,
        }
    }
}

impl Default for Appointments {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for Appointments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) if *n > 0 => write!(f, "{}", n),
            _ => f.write_str("∞"),
        }
    }
}

impl Serialize for Appointments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u32(*n),
            Self::Unlimited => serializer.serialize_u32(0),
        }
    }
}

impl<'de> Deserialize<'de> for Appointments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(0) => Ok(Self::Unlimited),
            Raw::Num(n) => u32::try_from(n)
                .map(Self::Count)
                .map_err(|_| D::Error::custom(format!("appointment count out of range: {n}"))),
            Raw::Text(s) if s.eq_ignore_ascii_case("unlimited") => Ok(Self::Unlimited),
            Raw::Text(s) => Err(D::Error::custom(format!("invalid appointment count: {s}"))),
        }
    }
}

/// Alternative parameter set for a service
///
/// Each option carries its own derived totals; the parent service's
/// `selectedOption` index chooses which option is authoritative for the
/// service-level derived fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pros: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,

    // -- Derived by recalculation --
    #[serde(default)]
    pub total_appointments: Appointments,
    #[serde(default)]
    pub service_cost: f64,
}

/// One billable line item
///
/// Quantitative fields are optional and populated per service type; the
/// pricing engine interprets them through an exhaustive match on
/// [`ServiceType`]. `totalAppointments` and `serviceCost` are derived
/// outputs and only ever produced by the recalculation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_type: ServiceType,

    // -- Quantitative inputs --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pros: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// Minutes per appointment slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_time: Option<u32>,
    /// What each professional is paid per hour (margin input)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_hourly: Option<f64>,
    /// Flat early-arrival fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_arrival: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    /// Class length in minutes (mindfulness flat-fee table)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,

    // -- Type-specific descriptors --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub massage_type: Option<MassageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mindfulness_type: Option<MindfulnessType>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<RecurringFrequency>,

    // -- Alternative parameter sets --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_options: Option<Vec<PricingOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<usize>,

    // -- Derived by recalculation --
    #[serde(default)]
    pub total_appointments: Appointments,
    #[serde(default)]
    pub service_cost: f64,
}

impl Service {
    /// Create a bare service of the given type; quantitative fields default
    /// to absent and derived fields to zero until a recalculation pass runs.
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            service_type,
            total_hours: None,
            num_pros: None,
            hourly_rate: None,
            app_time: None,
            pro_hourly: None,
            early_arrival: None,
            discount_percent: None,
            class_length: None,
            participants: None,
            massage_type: None,
            mindfulness_type: None,
            is_recurring: false,
            recurring_frequency: None,
            pricing_options: None,
            selected_option: None,
            total_appointments: Appointments::default(),
            service_cost: 0.0,
        }
    }

    /// The pricing option index that is authoritative for this service's
    /// derived fields. Absent or out-of-range indices fall back to 0.
    pub fn selected_option_index(&self) -> usize {
        let len = self.pricing_options.as_ref().map_or(0, |o| o.len());
        match self.selected_option {
            Some(i) if i < len => i,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointments_sentinel_deserialize() {
        let n: Appointments = serde_json::from_str("12").unwrap();
        assert_eq!(n, Appointments::Count(12));

        let zero: Appointments = serde_json::from_str("0").unwrap();
        assert_eq!(zero, Appointments::Unlimited);

        let text: Appointments = serde_json::from_str("\"unlimited\"").unwrap();
        assert_eq!(text, Appointments::Unlimited);

        assert!(serde_json::from_str::<Appointments>("\"lots\"").is_err());
    }

    #[test]
    fn test_appointments_serialize_sentinel_as_zero() {
        assert_eq!(serde_json::to_string(&Appointments::Unlimited).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Appointments::Count(7)).unwrap(), "7");
    }

    #[test]
    fn test_appointments_display_infinity() {
        assert_eq!(Appointments::Unlimited.to_string(), "∞");
        assert_eq!(Appointments::Count(0).to_string(), "∞");
        assert_eq!(Appointments::Count(40).to_string(), "40");
    }

    #[test]
    fn test_appointments_rollup_absorbs_unlimited() {
        let total = Appointments::Count(10).plus(Appointments::Unlimited);
        assert_eq!(total, Appointments::Unlimited);

        let total = Appointments::Count(10).plus(Appointments::Count(5));
        assert_eq!(total, Appointments::Count(15));
    }

    #[test]
    fn test_selected_option_index_clamps() {
        let mut service = Service::new(ServiceType::Massage);
        service.pricing_options = Some(vec![PricingOption::default(), PricingOption::default()]);

        service.selected_option = Some(1);
        assert_eq!(service.selected_option_index(), 1);

        service.selected_option = Some(9);
        assert_eq!(service.selected_option_index(), 0);

        service.selected_option = None;
        assert_eq!(service.selected_option_index(), 0);
    }

    #[test]
    fn test_service_wire_shape_is_camel_case() {
        let mut service = Service::new(ServiceType::Mindfulness);
        service.class_length = Some(30);
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["serviceType"], "mindfulness");
        assert_eq!(json["classLength"], 30);
        // Unpopulated inputs stay absent on the wire
        assert!(json.get("totalHours").is_none());
    }
}
