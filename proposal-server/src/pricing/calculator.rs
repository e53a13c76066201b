//! Service Quote Calculator
//!
//! Per-service cost and appointment math:
//! - Staffed hourly services (massage, hair, nails, headshots)
//! - Flat-fee classes (mindfulness, priced by class length)
//! - Recurring-tier vs manual percentage discounts (never stacked)
//! - Pricing-option overrides of the base parameters
//!
//! Uses rust_decimal for precise calculations, stores as f64.

use rust_decimal::prelude::*;
use shared::models::{Appointments, PricingOption, Service, ServiceType};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// ==================== Rate Basis ====================

/// How a service's raw cost is determined
///
/// One variant per pricing shape; derived from [`ServiceType`] with an
/// exhaustive match so a new service type cannot be priced implicitly.
#[derive(Debug, Clone, PartialEq)]
enum RateBasis {
    /// hours × professionals × hourly rate, plus any flat early-arrival fee
    Hourly {
        hours: Decimal,
        pros: u32,
        rate: Decimal,
        /// Minutes per appointment slot
        slot_minutes: u32,
        early_arrival: Decimal,
    },
    /// Flat class fee, capacity from participants (absent ⇒ unlimited)
    FlatClass {
        fee: Decimal,
        participants: Option<u32>,
    },
}

/// Minutes per appointment slot when the service does not specify one
fn default_slot_minutes(service_type: ServiceType) -> u32 {
    match service_type {
        ServiceType::Massage => 20,
        ServiceType::Hair => 30,
        ServiceType::Nails => 30,
        ServiceType::Headshot => 10,
        // Class-based, slots do not apply
        ServiceType::Mindfulness => 0,
    }
}

/// Flat class fee by length: 30 min → $1250, 60 min → $1500,
/// anything else (including missing) → $1375 (intro default)
fn mindfulness_class_fee(class_length: Option<u32>) -> Decimal {
    match class_length {
        Some(30) => Decimal::from(1250),
        Some(60) => Decimal::from(1500),
        _ => Decimal::from(1375),
    }
}

/// Effective quantitative inputs: the service's base parameters overridden
/// by any option-specific values
struct EffectiveInputs {
    total_hours: f64,
    num_pros: u32,
    hourly_rate: f64,
    discount_percent: Option<f64>,
}

fn effective_inputs(service: &Service, option: Option<&PricingOption>) -> EffectiveInputs {
    EffectiveInputs {
        total_hours: option
            .and_then(|o| o.total_hours)
            .or(service.total_hours)
            .unwrap_or(0.0),
        num_pros: option
            .and_then(|o| o.num_pros)
            .or(service.num_pros)
            .unwrap_or(1),
        hourly_rate: option
            .and_then(|o| o.hourly_rate)
            .or(service.hourly_rate)
            .unwrap_or(0.0),
        discount_percent: option.and_then(|o| o.discount_percent).or(service.discount_percent),
    }
}

fn rate_basis(service: &Service, inputs: &EffectiveInputs) -> RateBasis {
    match service.service_type {
        ServiceType::Massage | ServiceType::Hair | ServiceType::Nails | ServiceType::Headshot => {
            RateBasis::Hourly {
                hours: to_decimal(inputs.total_hours),
                pros: inputs.num_pros,
                rate: to_decimal(inputs.hourly_rate),
                slot_minutes: service
                    .app_time
                    .filter(|m| *m > 0)
                    .unwrap_or_else(|| default_slot_minutes(service.service_type)),
                early_arrival: to_decimal(service.early_arrival.unwrap_or(0.0)),
            }
        }
        ServiceType::Mindfulness => RateBasis::FlatClass {
            fee: mindfulness_class_fee(service.class_length),
            participants: service.participants,
        },
    }
}

// ==================== Discounts ====================

/// Recurring engagement discount tier:
/// ≥9 occurrences → 20% off, ≥4 → 15%, else none
pub fn recurring_discount_percent(occurrences: u32) -> f64 {
    if occurrences >= 9 {
        20.0
    } else if occurrences >= 4 {
        15.0
    } else {
        0.0
    }
}

/// The percentage actually applied: the recurring tier replaces the manual
/// discount for recurring services — the two are never stacked.
fn applied_discount_percent(service: &Service, manual: Option<f64>) -> Decimal {
    if service.is_recurring {
        let occurrences = service
            .recurring_frequency
            .as_ref()
            .map_or(0, |f| f.occurrences);
        to_decimal(recurring_discount_percent(occurrences))
    } else {
        to_decimal(manual.unwrap_or(0.0))
    }
}

// ==================== Quote ====================

/// Derived outputs for one service or pricing option
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceQuote {
    pub service_cost: f64,
    pub total_appointments: Appointments,
}

fn quote(service: &Service, option: Option<&PricingOption>) -> ServiceQuote {
    let inputs = effective_inputs(service, option);

    let (raw_cost, appointments) = match rate_basis(service, &inputs) {
        RateBasis::Hourly {
            hours,
            pros,
            rate,
            slot_minutes,
            early_arrival,
        } => {
            let cost = hours * Decimal::from(pros) * rate + early_arrival;
            let slots = if slot_minutes > 0 {
                (hours * Decimal::from(60) / Decimal::from(slot_minutes))
                    .floor()
                    .to_u32()
                    .unwrap_or(0)
            } else {
                0
            };
            (cost, Appointments::Count(slots.saturating_mul(pros)))
        }
        RateBasis::FlatClass { fee, participants } => {
            let capacity = match participants {
                Some(n) if n > 0 => Appointments::Count(n),
                _ => Appointments::Unlimited,
            };
            (fee, capacity)
        }
    };

    let discount = applied_discount_percent(service, inputs.discount_percent);
    let multiplier = Decimal::ONE - discount / Decimal::ONE_HUNDRED;
    let discounted = (raw_cost * multiplier).max(Decimal::ZERO);

    ServiceQuote {
        service_cost: to_f64(discounted),
        total_appointments: appointments,
    }
}

/// Quote a service from its own base parameters
pub fn quote_service(service: &Service) -> ServiceQuote {
    quote(service, None)
}

/// Quote one pricing option: base parameters overridden by the option's
/// `totalHours` / `hourlyRate` / `numPros` / `discountPercent`
pub fn quote_option(service: &Service, option: &PricingOption) -> ServiceQuote {
    quote(service, Some(option))
}

/// What the professionals staffing the selected configuration are paid,
/// used for the proposal-level margin rollup
pub fn pro_payout(service: &Service) -> Decimal {
    let Some(pro_hourly) = service.pro_hourly else {
        return Decimal::ZERO;
    };
    let selected = service
        .pricing_options
        .as_ref()
        .and_then(|o| o.get(service.selected_option_index()));
    let inputs = effective_inputs(service, selected);
    to_decimal(inputs.total_hours) * Decimal::from(inputs.num_pros) * to_decimal(pro_hourly)
}
