//! Data models
//!
//! Shared between proposal-server and frontends (via API).
//! Proposal documents use camelCase on the wire, matching the persisted
//! `data` / `original_data` JSON columns. All timestamps are Unix millis.

pub mod change;
pub mod proposal;
pub mod service;

// Re-exports
pub use change::*;
pub use proposal::*;
pub use service::*;
