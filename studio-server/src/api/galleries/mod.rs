//! Gallery API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/galleries", routes())
        // Public stock-gallery view lives outside the admin nest so the
        // slug segment never collides with gallery ids.
        .route("/api/public-galleries/{slug}", get(handler::public_view))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", put(handler::update).get(handler::get_by_id))
        .route("/{id}/photos", post(handler::add_photo).get(handler::list_photos))
        .route("/{id}/leads", get(handler::list_leads))
}
