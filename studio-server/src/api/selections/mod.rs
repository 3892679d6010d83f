//! Selection API module (client favorite toggling)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/selections/toggle", post(handler::toggle))
}
