//! Change Tracking API module

mod handler;

pub use handler::{ChangeSetView, ChangeView};

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/proposals/{id}/changes",
            get(handler::list).post(handler::submit),
        )
        .route("/api/change-sets/{id}/review", post(handler::review))
}
