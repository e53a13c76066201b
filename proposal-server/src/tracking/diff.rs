//! Proposal diff computation
//!
//! Compares two versions of a proposal document field by field and produces
//! an ordered list of [`ProposalChange`] records. Three passes:
//!
//! 1. A scalar pass over a fixed allow-list of top-level and
//!    `customization.*` dotted paths.
//! 2. A service-tree pass over the union of locations and dates, walking
//!    the per-date service arrays **by index**. Positional matching is
//!    deliberate: inserting or deleting a service mid-list cascades into
//!    diffs for every subsequent index. Reviewers expect the current
//!    grouping; do not switch to identity-based matching without
//!    confirming the desired semantics.
//! 3. A derived-total guard that reports date-level `totalCost` /
//!    `totalAppointments` drift only when no service-level change already
//!    explains it.
//!
//! Floating-point values use tolerance comparison to absorb
//! serialization round-trip noise. A missing key and an explicit JSON
//! `null` are both treated as "absent".

use serde_json::Value;
use std::collections::BTreeSet;

use shared::models::{ProposalChange, ProposalData, Submitter};

/// Float comparison tolerance (handles serialize/deserialize precision loss)
const FLOAT_EPSILON: f64 = 1e-9;

/// Fixed allow-list for the scalar pass
const SCALAR_FIELDS: &[&str] = &[
    "clientName",
    "clientEmail",
    "eventDates",
    "locations",
    "customization.contactName",
    "customization.customNote",
    "customization.showServiceDescriptions",
    "customization.showPricingBreakdown",
    "customization.showDiscounts",
];

/// Service fields compared positionally in the service-tree pass
const TRACKED_SERVICE_FIELDS: &[&str] = &[
    "totalHours",
    "numPros",
    "hourlyRate",
    "appTime",
    "proHourly",
    "earlyArrival",
    "discountPercent",
    "massageType",
    "classLength",
    "participants",
    "selectedOption",
];

/// Date-level derived fields reported only when nothing else explains them
const DATE_TOTAL_FIELDS: &[&str] = &["totalCost", "totalAppointments"];

/// Recursively compare two JSON values (floats with tolerance)
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => (fa - fb).abs() < FLOAT_EPSILON,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| values_equal(va, vb)))
        }
        (a, b) => a == b,
    }
}

/// Compare two possibly-absent values; both absent counts as equal
fn sides_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

/// Walk a dotted path through nested objects; missing keys and explicit
/// nulls both come back as absent
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    present(Some(current))
}

/// Collapse explicit JSON null into absence
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Fetch a field from a possibly-absent object, collapsing nulls
fn get_field<'a>(container: Option<&'a Value>, field: &str) -> Option<&'a Value> {
    present(container?.as_object()?.get(field))
}

fn object_keys(value: Option<&Value>) -> impl Iterator<Item = &String> {
    value
        .and_then(|v| v.as_object())
        .into_iter()
        .flat_map(|m| m.keys())
}

fn service_list(date: Option<&Value>) -> &[Value] {
    date.and_then(|v| v.get("services"))
        .and_then(|v| v.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

/// Compute the field-level differences between two proposal documents.
///
/// Pure and eager: one finite list per call, no side effects. Every
/// produced change is stamped with the submitter identity.
pub fn track_proposal_changes(
    original: &ProposalData,
    new: &ProposalData,
    submitter: &Submitter,
) -> Vec<ProposalChange> {
    let old_root = serde_json::to_value(original).unwrap_or(Value::Null);
    let new_root = serde_json::to_value(new).unwrap_or(Value::Null);

    let mut changes = Vec::new();

    // ==================== Scalar pass ====================
    for path in SCALAR_FIELDS {
        let old_value = lookup(&old_root, path);
        let new_value = lookup(&new_root, path);
        if !sides_equal(old_value, new_value) {
            changes.push(ProposalChange::new(
                *path,
                old_value.cloned(),
                new_value.cloned(),
                submitter,
            ));
        }
    }

    // ==================== Service-tree pass ====================
    let old_locations = old_root.get("services");
    let new_locations = new_root.get("services");

    let location_keys: BTreeSet<&String> = object_keys(old_locations)
        .chain(object_keys(new_locations))
        .collect();

    for location in location_keys {
        let old_dates = get_field(old_locations, location);
        let new_dates = get_field(new_locations, location);

        let date_keys: BTreeSet<&String> = object_keys(old_dates)
            .chain(object_keys(new_dates))
            .collect();

        for date in date_keys {
            let old_date = get_field(old_dates, date);
            let new_date = get_field(new_dates, date);
            let old_services = service_list(old_date);
            let new_services = service_list(new_date);

            let date_prefix = format!("services.{location}.{date}");
            let before_date = changes.len();

            let count = old_services.len().max(new_services.len());
            for index in 0..count {
                let prefix = format!("{date_prefix}.services.{index}");
                match (old_services.get(index), new_services.get(index)) {
                    // Added service: serviceType plus every populated field
                    (None, Some(added)) => {
                        let added = Some(added);
                        changes.push(ProposalChange::new(
                            format!("{prefix}.serviceType"),
                            None,
                            get_field(added, "serviceType").cloned(),
                            submitter,
                        ));
                        for field in TRACKED_SERVICE_FIELDS {
                            if let Some(value) = get_field(added, field) {
                                changes.push(ProposalChange::new(
                                    format!("{prefix}.{field}"),
                                    None,
                                    Some(value.clone()),
                                    submitter,
                                ));
                            }
                        }
                    }
                    // Removed service: a single serviceType removal, the
                    // per-field removals are not itemized
                    (Some(removed), None) => {
                        changes.push(ProposalChange::new(
                            format!("{prefix}.serviceType"),
                            get_field(Some(removed), "serviceType").cloned(),
                            None,
                            submitter,
                        ));
                    }
                    // Same index on both sides: field-wise comparison
                    (Some(old_service), Some(new_service)) => {
                        let old_service = Some(old_service);
                        let new_service = Some(new_service);

                        for field in TRACKED_SERVICE_FIELDS {
                            let old_value = get_field(old_service, field);
                            let new_value = get_field(new_service, field);
                            if !sides_equal(old_value, new_value) {
                                changes.push(ProposalChange::new(
                                    format!("{prefix}.{field}"),
                                    old_value.cloned(),
                                    new_value.cloned(),
                                    submitter,
                                ));
                            }
                        }

                        // A changed option list with a changed selection gets
                        // its own selectedOption entry when the field loop
                        // did not already report one
                        let options_differ = !sides_equal(
                            get_field(old_service, "pricingOptions"),
                            get_field(new_service, "pricingOptions"),
                        );
                        let old_selected = get_field(old_service, "selectedOption");
                        let new_selected = get_field(new_service, "selectedOption");
                        let selected_field = format!("{prefix}.selectedOption");
                        if options_differ
                            && !sides_equal(old_selected, new_selected)
                            && !changes.iter().any(|c| c.field == selected_field)
                        {
                            changes.push(ProposalChange::new(
                                selected_field,
                                old_selected.cloned(),
                                new_selected.cloned(),
                                submitter,
                            ));
                        }
                    }
                    (None, None) => unreachable!(),
                }
            }

            // ==================== Derived-total guard ====================
            // Date totals follow from the service changes already reported;
            // only unexplained drift is worth a row of its own.
            let had_service_changes = changes.len() > before_date;
            if !had_service_changes {
                for field in DATE_TOTAL_FIELDS {
                    let old_value = get_field(old_date, field);
                    let new_value = get_field(new_date, field);
                    if !sides_equal(old_value, new_value) {
                        changes.push(ProposalChange::new(
                            format!("{date_prefix}.{field}"),
                            old_value.cloned(),
                            new_value.cloned(),
                            submitter,
                        ));
                    }
                }
            }
        }
    }

    changes
}
