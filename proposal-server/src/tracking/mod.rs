//! Change Tracking
//!
//! Computes reviewer-facing field-level diffs between the retained proposal
//! snapshot and an edited document ([`diff`]), and renders each change with
//! a human-readable label and value strings ([`display`]).

pub mod diff;
pub mod display;

pub use diff::track_proposal_changes;
pub use display::{change_display_info, ChangeDisplayInfo};
