//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`proposals`] - proposal CRUD, approval, views, export
//! - [`changes`] - change submission, listing, and review

pub mod changes;
pub mod health;
pub mod proposals;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};
