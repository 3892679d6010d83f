//! Order API module (admin)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/payment-link", post(handler::attach_payment_link))
        .route("/{id}/confirm-payment", post(handler::confirm_payment))
        .route("/{id}/status", post(handler::update_status))
}
