//! Proposal export
//!
//! Renders the reviewer-facing document and the download file name
//! consumed by the external PDF rasterizer.

use serde::Serialize;

use shared::models::{Proposal, ProposalData};

/// Rendered export bundle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub file_name: String,
    pub html: String,
}

impl ExportDocument {
    pub fn for_proposal(proposal: &Proposal) -> Self {
        Self {
            file_name: export_file_name(&proposal.client_name),
            html: render_document(&proposal.data),
        }
    }
}

/// Download name for the rasterized document
pub fn export_file_name(client_name: &str) -> String {
    format!("{}-proposal.pdf", client_name)
}

/// Render the proposal document as self-contained HTML
pub fn render_document(data: &ProposalData) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<article class=\"proposal\">");
    html.push_str(&format!("<h1>Proposal for {}</h1>", data.client_name));

    if let Some(contact) = data.customization.contact_name.as_deref() {
        html.push_str(&format!("<p class=\"contact\">Prepared by {}</p>", contact));
    }
    if let Some(note) = data.customization.custom_note.as_deref() {
        html.push_str(&format!("<p class=\"note\">{}</p>", note));
    }

    for (location, dates) in &data.services {
        html.push_str(&format!("<section><h2>{}</h2>", location));
        for (date, date_data) in dates {
            html.push_str(&format!("<h3>{}</h3><ul>", date));
            for service in &date_data.services {
                html.push_str(&format!(
                    "<li>{} · {} appointments · ${:.2}",
                    service.service_type.display_name(),
                    service.total_appointments,
                    service.service_cost,
                ));
                if data.customization.show_service_descriptions {
                    html.push_str(&format!(
                        "<br/><small>{}</small>",
                        service.service_type.description()
                    ));
                }
                html.push_str("</li>");
            }
            html.push_str(&format!(
                "</ul><p class=\"date-total\">Day total: ${:.2} ({} appointments)</p>",
                date_data.total_cost, date_data.total_appointments,
            ));
        }
        html.push_str("</section>");
    }

    html.push_str(&format!(
        "<footer>Total: ${:.2} · {} appointments</footer>",
        data.summary.total_cost, data.summary.total_appointments,
    ));
    html.push_str("</article>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DateData, LocationData, Service, ServiceType};

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Acme Corp"), "Acme Corp-proposal.pdf");
    }

    #[test]
    fn test_unlimited_renders_as_infinity() {
        let mut class = Service::new(ServiceType::Mindfulness);
        class.class_length = Some(30);
        let mut data = ProposalData {
            client_name: "Acme".to_string(),
            ..Default::default()
        };
        let mut dates = LocationData::new();
        dates.insert(
            "2025-06-01".to_string(),
            DateData {
                services: vec![class],
                ..Default::default()
            },
        );
        data.services.insert("Boston".to_string(), dates);

        let data = crate::pricing::recalculate(data);
        let html = render_document(&data);
        assert!(html.contains("∞ appointments"));
        assert!(!html.contains("0 appointments"));
    }

    #[test]
    fn test_description_toggle() {
        let mut service = Service::new(ServiceType::Massage);
        service.total_hours = Some(1.0);
        let mut data = ProposalData {
            client_name: "Acme".to_string(),
            ..Default::default()
        };
        let mut dates = LocationData::new();
        dates.insert(
            "2025-06-01".to_string(),
            DateData {
                services: vec![service],
                ..Default::default()
            },
        );
        data.services.insert("Boston".to_string(), dates);

        let without = render_document(&data);
        assert!(!without.contains("licensed therapists"));

        data.customization.show_service_descriptions = true;
        let with = render_document(&data);
        assert!(with.contains("licensed therapists"));
    }
}
