//! Repository Module
//!
//! CRUD operations over the SQLite tables, one repository per table.

pub mod change_set;
pub mod proposal;
pub mod view_event;

// Re-exports
pub use change_set::ChangeSetRepository;
pub use proposal::ProposalRepository;
pub use view_event::ViewRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The schema is missing or out of date (migrations not applied).
    /// Detected from the driver message so it can surface as a distinct
    /// "contact support" response instead of a generic failure.
    #[error("Database schema missing")]
    SchemaMissing,

    #[error("Corrupt stored document: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.message().contains("no such table") {
                return RepoError::SchemaMissing;
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::SchemaMissing => AppError::schema_missing(),
            RepoError::Corrupt(msg) => {
                AppError::with_message(ErrorCode::ProposalDataCorrupt, msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
