//! Pricing Engine
//!
//! Recomputes every derived money/appointment field in a proposal from its
//! leaf inputs: per-service quotes ([`calculator`]) and the whole-tree
//! projection with date and proposal rollups ([`engine`]).
//!
//! Derived fields are stored for the consumed row shape but never
//! authoritative — [`engine::recalculate`] is the single projection that
//! produces them, and every write path goes through it.

pub mod calculator;
pub mod engine;

pub use calculator::{quote_option, quote_service, recurring_discount_percent, ServiceQuote};
pub use engine::recalculate;
