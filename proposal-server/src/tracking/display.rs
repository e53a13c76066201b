//! Human-readable change rendering
//!
//! Maps a change's dotted field path to a reviewer-facing label and its raw
//! JSON values to display strings. Pure functions of their inputs.
//!
//! Label resolution order: fixed dictionary for known top-level and
//! customization fields → service-path parser
//! (`services.<location>.<date>.services.<index>.<field>`) → camelCase to
//! Title Case fallback.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use shared::models::{ProposalChange, ServiceType, TBD_DATE};

/// Rendered label and value strings for one change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDisplayInfo {
    pub field_label: String,
    pub old_display: String,
    pub new_display: String,
}

/// Render a change for display. Calling this twice on the same change
/// always yields identical strings.
pub fn change_display_info(change: &ProposalChange) -> ChangeDisplayInfo {
    let field = last_segment(&change.field);
    ChangeDisplayInfo {
        field_label: field_label(&change.field),
        old_display: render_value(field, change.old_value.as_ref()),
        new_display: render_value(field, change.new_value.as_ref()),
    }
}

// ==================== Field Labels ====================

fn known_label(field: &str) -> Option<&'static str> {
    let label = match field {
        "clientName" => "Client Name",
        "clientEmail" => "Client Email",
        "eventDates" => "Event Dates",
        "locations" => "Locations",
        "customization.contactName" => "Contact Name",
        "customization.customNote" => "Custom Note",
        "customization.showServiceDescriptions" => "Show Service Descriptions",
        "customization.showPricingBreakdown" => "Show Pricing Breakdown",
        "customization.showDiscounts" => "Show Discounts",
        _ => return None,
    };
    Some(label)
}

fn service_field_label(field: &str) -> Option<&'static str> {
    let label = match field {
        "serviceType" => "Service Type",
        "totalHours" => "Total Hours",
        "numPros" => "Number of Professionals",
        "hourlyRate" => "Hourly Rate",
        "appTime" => "Appointment Length",
        "proHourly" => "Professional Hourly Rate",
        "earlyArrival" => "Early Arrival Fee",
        "discountPercent" => "Discount",
        "massageType" => "Massage Type",
        "classLength" => "Class Length",
        "participants" => "Participants",
        "selectedOption" => "Selected Pricing Option",
        "totalCost" => "Total Cost",
        "totalAppointments" => "Total Appointments",
        _ => return None,
    };
    Some(label)
}

/// Resolve a dotted field path into a display label
pub fn field_label(field: &str) -> String {
    if let Some(label) = known_label(field) {
        return label.to_string();
    }
    if let Some(label) = parse_service_path(field) {
        return label;
    }
    camel_to_title(last_segment(field))
}

/// `services.<location>.<date>.services.<index>.<field>` and the date-level
/// `services.<location>.<date>.<field>` shapes
fn parse_service_path(field: &str) -> Option<String> {
    let parts: Vec<&str> = field.split('.').collect();
    if parts.first() != Some(&"services") || parts.len() < 4 {
        return None;
    }
    let location = parts[1];
    let date = format_event_date(parts[2]);

    if parts.len() >= 6 && parts[3] == "services" {
        let index: usize = parts[4].parse().ok()?;
        let tail = parts[5..].join(".");
        let label = service_field_label(&tail).map_or_else(|| camel_to_title(&tail), String::from);
        return Some(format!("{} - {} - Service {} - {}", location, date, index + 1, label));
    }

    let tail = parts[3..].join(".");
    let label = service_field_label(&tail).map_or_else(|| camel_to_title(&tail), String::from);
    Some(format!("{} - {} - {}", location, date, label))
}

/// ISO date → "MMM d, yyyy"; the TBD literal (and anything unparseable)
/// passes through unchanged
fn format_event_date(date: &str) -> String {
    if date == TBD_DATE {
        return date.to_string();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// "numPros" → "Num Pros"
fn camel_to_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

fn last_segment(field: &str) -> &str {
    field.rsplit('.').next().unwrap_or(field)
}

// ==================== Value Rendering ====================

/// Fields rendered as $-prefixed fixed-point currency
const CURRENCY_FIELDS: &[&str] = &[
    "hourlyRate",
    "proHourly",
    "earlyArrival",
    "serviceCost",
    "totalCost",
];

/// Fields rendered with a % suffix
const PERCENT_FIELDS: &[&str] = &["discountPercent"];

/// Fields carrying the unlimited sentinel (0 / "unlimited" → ∞)
const CAPACITY_FIELDS: &[&str] = &["totalAppointments", "participants"];

/// Render a raw change value for the given (unqualified) field name
pub fn render_value(field: &str, value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "(none)".to_string();
    };

    if CAPACITY_FIELDS.contains(&field) {
        if let Some(capacity) = render_capacity(value) {
            return capacity;
        }
    }
    if CURRENCY_FIELDS.contains(&field) {
        if let Some(n) = value.as_f64() {
            return format!("${:.2}", n);
        }
    }
    if PERCENT_FIELDS.contains(&field) {
        if let Some(n) = value.as_f64() {
            return format!("{}%", format_number(n));
        }
    }
    if field == "serviceType" {
        if let Some(label) = service_type_label(value) {
            return label;
        }
    }
    if field == "selectedOption" {
        if let Some(index) = value.as_u64() {
            return format!("Option {}", index + 1);
        }
    }

    render_generic(value)
}

/// The unlimited sentinel: numeric 0 or the string "unlimited" never render
/// as a numeral
fn render_capacity(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64()?;
            if n == 0.0 {
                Some("∞".to_string())
            } else {
                Some(format_number(n))
            }
        }
        Value::String(s) if s.eq_ignore_ascii_case("unlimited") => Some("∞".to_string()),
        _ => None,
    }
}

fn service_type_label(value: &Value) -> Option<String> {
    serde_json::from_value::<ServiceType>(value.clone())
        .ok()
        .map(|t| t.display_name().to_string())
}

fn render_generic(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            if items.iter().all(|v| !v.is_object() && !v.is_array()) {
                items
                    .iter()
                    .map(render_generic)
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                format!("{} items", items.len())
            }
        }
        Value::Object(map) => {
            // A service-shaped object gets a one-line summary
            if map.contains_key("serviceType") {
                let name = map
                    .get("serviceType")
                    .and_then(|v| service_type_label(v))
                    .unwrap_or_else(|| "Service".to_string());
                let pros = map.get("numPros").map_or_else(|| "?".to_string(), render_generic);
                let hours = map
                    .get("totalHours")
                    .map_or_else(|| "?".to_string(), render_generic);
                let rate = map
                    .get("hourlyRate")
                    .map_or_else(|| "?".to_string(), render_generic);
                return format!("{} ({} pros, {} hours, ${}/hr)", name, pros, hours, rate);
            }
            if map.len() <= 3 {
                map.iter()
                    .map(|(k, v)| format!("{}: {}", k, render_generic(v)))
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                format!("{} properties", map.len())
            }
        }
    }
}

/// f64 without trailing ".0" noise — 150.0 → "150", 2.5 → "2.5"
fn format_number(n: f64) -> String {
    format!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::Submitter;

    fn change(field: &str, old: Option<Value>, new: Option<Value>) -> ProposalChange {
        ProposalChange::new(field, old, new, &Submitter::default())
    }

    #[test]
    fn test_known_label_dictionary() {
        assert_eq!(field_label("clientName"), "Client Name");
        assert_eq!(field_label("customization.customNote"), "Custom Note");
    }

    #[test]
    fn test_service_path_label() {
        assert_eq!(
            field_label("services.Boston.2025-06-01.services.0.numPros"),
            "Boston - Jun 1, 2025 - Service 1 - Number of Professionals"
        );
    }

    #[test]
    fn test_service_path_tbd_passthrough() {
        assert_eq!(
            field_label("services.Boston.TBD.services.1.totalHours"),
            "Boston - TBD - Service 2 - Total Hours"
        );
    }

    #[test]
    fn test_date_level_label() {
        assert_eq!(
            field_label("services.Austin.2025-12-24.totalCost"),
            "Austin - Dec 24, 2025 - Total Cost"
        );
    }

    #[test]
    fn test_camel_case_fallback() {
        assert_eq!(field_label("proposalTitle"), "Proposal Title");
        assert_eq!(field_label("customization.headerColor"), "Header Color");
    }

    #[test]
    fn test_currency_rendering() {
        assert_eq!(render_value("hourlyRate", Some(&json!(150))), "$150.00");
        assert_eq!(render_value("totalCost", Some(&json!(1234.5))), "$1234.50");
    }

    #[test]
    fn test_percent_rendering() {
        assert_eq!(render_value("discountPercent", Some(&json!(10))), "10%");
        assert_eq!(render_value("discountPercent", Some(&json!(12.5))), "12.5%");
    }

    #[test]
    fn test_unlimited_sentinel_renders_infinity() {
        assert_eq!(render_value("totalAppointments", Some(&json!(0))), "∞");
        assert_eq!(
            render_value("totalAppointments", Some(&json!("unlimited"))),
            "∞"
        );
        assert_eq!(render_value("participants", Some(&json!(0))), "∞");
        // Real counts still render as numbers
        assert_eq!(render_value("totalAppointments", Some(&json!(18))), "18");
    }

    #[test]
    fn test_boolean_rendering() {
        assert_eq!(render_value("showDiscounts", Some(&json!(true))), "Yes");
        assert_eq!(render_value("showDiscounts", Some(&json!(false))), "No");
    }

    #[test]
    fn test_primitive_array_joined() {
        assert_eq!(
            render_value("eventDates", Some(&json!(["2025-06-01", "TBD"]))),
            "2025-06-01, TBD"
        );
    }

    #[test]
    fn test_object_array_counted() {
        assert_eq!(
            render_value("pricingOptions", Some(&json!([{ "a": 1 }, { "b": 2 }]))),
            "2 items"
        );
    }

    #[test]
    fn test_service_shaped_object_summary() {
        let service = json!({
            "serviceType": "massage",
            "numPros": 3,
            "totalHours": 2,
            "hourlyRate": 150
        });
        assert_eq!(
            render_value("service", Some(&service)),
            "Massage (3 pros, 2 hours, $150/hr)"
        );
    }

    #[test]
    fn test_small_object_inlined_large_object_counted() {
        assert_eq!(
            render_value("extra", Some(&json!({ "a": 1, "b": true }))),
            "a: 1, b: Yes"
        );
        assert_eq!(
            render_value("extra", Some(&json!({ "a": 1, "b": 2, "c": 3, "d": 4 }))),
            "4 properties"
        );
    }

    #[test]
    fn test_service_type_value_display() {
        assert_eq!(render_value("serviceType", Some(&json!("massage"))), "Massage");
        assert_eq!(
            render_value("serviceType", Some(&json!("mindfulness"))),
            "Mindfulness Session"
        );
    }

    #[test]
    fn test_selected_option_one_based() {
        assert_eq!(render_value("selectedOption", Some(&json!(1))), "Option 2");
    }

    #[test]
    fn test_absent_value_rendering() {
        assert_eq!(render_value("clientEmail", None), "(none)");
    }

    #[test]
    fn test_display_info_is_stable() {
        let change = change(
            "services.Boston.2025-06-01.services.0.hourlyRate",
            Some(json!(150)),
            Some(json!(175)),
        );
        let first = change_display_info(&change);
        let second = change_display_info(&change);
        assert_eq!(first, second);
        assert_eq!(
            first.field_label,
            "Boston - Jun 1, 2025 - Service 1 - Hourly Rate"
        );
        assert_eq!(first.old_display, "$150.00");
        assert_eq!(first.new_display, "$175.00");
    }
}
