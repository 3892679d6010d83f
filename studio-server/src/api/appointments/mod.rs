//! Appointment API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/appointments", routes())
}

fn routes() -> Router<ServerState> {
    // POST / (booking) and POST /{id}/approve-selection are public client
    // routes; the rest require an admin token (enforced by require_auth).
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/approve-selection", post(handler::approve_selection))
        .route("/{id}/share-slug", post(handler::issue_share_slug))
}
