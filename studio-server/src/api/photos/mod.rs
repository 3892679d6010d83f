//! Photo API module

mod handler;

use axum::{
    Router,
    routing::{delete, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/photos", routes())
}

fn routes() -> Router<ServerState> {
    // POST /{id}/comments is a public client route; the rest are admin.
    Router::new()
        .route("/{id}/comments", post(handler::add_comment).get(handler::list_comments))
        .route("/{id}/edited", put(handler::set_edited))
        .route("/{id}", delete(handler::delete).get(handler::get_by_id))
}
