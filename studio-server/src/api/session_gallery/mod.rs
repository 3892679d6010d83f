//! Session Gallery API module (client view)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/session-gallery/{appointment_id}",
        get(handler::get_for_client),
    )
}
