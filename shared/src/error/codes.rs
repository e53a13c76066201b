//! Unified error codes for the Wellspring platform
//!
//! Error codes are shared between the proposal server and its frontends.
//! Organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Proposal errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Staff key missing or invalid
    StaffKeyInvalid = 1002,
    /// Permission denied
    PermissionDenied = 1003,

    // ==================== 4xxx: Proposal ====================
    /// Proposal not found
    ProposalNotFound = 4001,
    /// Proposal has already been approved
    ProposalAlreadyApproved = 4002,
    /// Change set not found
    ChangeSetNotFound = 4003,
    /// Change set has already been reviewed
    ChangeSetAlreadyReviewed = 4004,
    /// Submitted edit contains no detected changes
    NoChangesDetected = 4005,
    /// Stored proposal document failed to parse
    ProposalDataCorrupt = 4006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Database schema missing (migrations not applied)
    SchemaMissing = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Authentication required",
            Self::StaffKeyInvalid => "Staff key missing or invalid",
            Self::PermissionDenied => "Permission denied",

            Self::ProposalNotFound => "Proposal not found",
            Self::ProposalAlreadyApproved => "Proposal has already been approved",
            Self::ChangeSetNotFound => "Change set not found",
            Self::ChangeSetAlreadyReviewed => "Change set has already been reviewed",
            Self::NoChangesDetected => "No changes detected in submission",
            Self::ProposalDataCorrupt => "Stored proposal document is corrupt",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::SchemaMissing => {
                "Database schema is missing or out of date, please contact support"
            }
        }
    }

    /// Get the error category for this code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            4000..=4999 => ErrorCategory::Proposal,
            _ => ErrorCategory::System,
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ValidationFailed | Self::InvalidRequest | Self::NoChangesDetected => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound | Self::ProposalNotFound | Self::ChangeSetNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyExists
            | Self::ProposalAlreadyApproved
            | Self::ChangeSetAlreadyReviewed => StatusCode::CONFLICT,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::StaffKeyInvalid | Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Unknown
            | Self::ProposalDataCorrupt
            | Self::InternalError
            | Self::DatabaseError
            | Self::SchemaMissing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1002 => Self::StaffKeyInvalid,
            1003 => Self::PermissionDenied,
            4001 => Self::ProposalNotFound,
            4002 => Self::ProposalAlreadyApproved,
            4003 => Self::ChangeSetNotFound,
            4004 => Self::ChangeSetAlreadyReviewed,
            4005 => Self::NoChangesDetected,
            4006 => Self::ProposalDataCorrupt,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::SchemaMissing,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::ProposalNotFound,
            ErrorCode::SchemaMissing,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(12345), Err(InvalidErrorCode(12345)));
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::StaffKeyInvalid.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::ProposalNotFound.category(),
            ErrorCategory::Proposal
        );
        assert_eq!(ErrorCode::SchemaMissing.category(), ErrorCategory::System);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            ErrorCode::ProposalNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ChangeSetAlreadyReviewed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::SchemaMissing.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::ProposalNotFound.to_string(), "E4001");
    }
}
