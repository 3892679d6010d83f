//! Shared album API module (guest email wall)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/shared/{slug}/access", post(handler::register_guest))
}
