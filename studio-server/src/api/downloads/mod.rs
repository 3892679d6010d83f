//! Download permission API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/downloads/{gallery_id}/permission",
        get(handler::check_permission),
    )
}
