//! Error category classification

use serde::{Deserialize, Serialize};

/// High-level classification of an error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Validation, not-found, conflicts
    General,
    /// Authentication and authorization
    Auth,
    /// Proposal domain rules
    Proposal,
    /// Database and internal failures
    System,
}

impl ErrorCategory {
    /// System errors are logged at error level when converted to responses
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}
