//! Proposals API module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/proposals", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/group/{group_id}", get(handler::list_by_group))
        .route("/{id}/data", put(handler::update_data))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/view", post(handler::record_view))
        .route("/{id}/export", get(handler::export))
}
