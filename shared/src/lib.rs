//! Shared types for the Wellspring proposal platform
//!
//! Domain models and the unified error system used by the proposal
//! server and its API consumers.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
