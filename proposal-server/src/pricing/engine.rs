//! Proposal Recalculation
//!
//! Walks the location → date → service tree and recomputes every derived
//! field from leaf inputs: per-option quotes, the selected-option mirror on
//! each service, date-level rollups, and the proposal summary. Pure
//! projection — running it twice yields the same tree as running it once.

use rust_decimal::Decimal;
use shared::models::{Appointments, ProposalData};

use super::calculator::{pro_payout, quote_option, quote_service, to_decimal, to_f64};

/// Recalculate every derived field in the proposal document.
///
/// Takes the tree by value, rewrites its derived fields in place, and
/// returns it. Derived fields are never read as inputs.
pub fn recalculate(mut data: ProposalData) -> ProposalData {
    let mut proposal_cost = Decimal::ZERO;
    let mut proposal_appointments = Appointments::Count(0);
    let mut payout = Decimal::ZERO;

    for dates in data.services.values_mut() {
        for date_data in dates.values_mut() {
            let mut date_cost = Decimal::ZERO;
            let mut date_appointments = Appointments::Count(0);

            for service in date_data.services.iter_mut() {
                // Options are quoted against a snapshot of the base inputs
                // so earlier option writes cannot leak into later quotes.
                let base = service.clone();
                if let Some(options) = service.pricing_options.as_mut() {
                    for option in options.iter_mut() {
                        let q = quote_option(&base, option);
                        option.service_cost = q.service_cost;
                        option.total_appointments = q.total_appointments;
                    }
                }

                // The selected option is authoritative for the service-level
                // derived fields; without options, the base inputs are.
                let selected = service
                    .pricing_options
                    .as_ref()
                    .and_then(|o| o.get(service.selected_option_index()));
                let (cost, appointments) = match selected {
                    Some(option) => (option.service_cost, option.total_appointments),
                    None => {
                        let q = quote_service(&base);
                        (q.service_cost, q.total_appointments)
                    }
                };
                service.service_cost = cost;
                service.total_appointments = appointments;

                date_cost += to_decimal(cost);
                date_appointments = date_appointments.plus(appointments);
                payout += pro_payout(service);
            }

            date_data.total_cost = to_f64(date_cost);
            date_data.total_appointments = date_appointments;

            proposal_cost += date_cost;
            proposal_appointments = proposal_appointments.plus(date_appointments);
        }
    }

    data.summary.total_cost = to_f64(proposal_cost);
    data.summary.total_appointments = proposal_appointments;
    data.summary.revenue = to_f64(proposal_cost);
    data.summary.margin = to_f64(proposal_cost - payout);

    data
}
