//! Server utilities

pub mod logger;

// Re-export the unified error types for handler signatures
pub use shared::error::{ApiResponse, AppError, AppResult};
