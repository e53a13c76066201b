//! Staff access
//!
//! The staff capability is injected through configuration rather than read
//! from ambient state: handlers that mutate on behalf of staff take a
//! [`StaffAccess`] argument, which only resolves when the configured key
//! header is present and matches.

use axum::extract::FromRequestParts;
use http::request::Parts;

use shared::error::{AppError, ErrorCode};

use crate::core::ServerState;

/// Header carrying the staff key
pub const STAFF_KEY_HEADER: &str = "x-staff-key";

/// Proof that the request carries the configured staff key
#[derive(Debug, Clone, Copy)]
pub struct StaffAccess;

impl FromRequestParts<ServerState> for StaffAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.staff_api_key.as_deref() else {
            return Err(AppError::with_message(
                ErrorCode::StaffKeyInvalid,
                "Staff access is not configured",
            ));
        };

        let provided = parts
            .headers
            .get(STAFF_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        match provided {
            Some(key) if key == expected => Ok(StaffAccess),
            _ => Err(AppError::new(ErrorCode::StaffKeyInvalid)),
        }
    }
}
