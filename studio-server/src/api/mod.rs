//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - admin login
//! - [`appointments`] - booking, lifecycle status, selection approval
//! - [`session_gallery`] - client gallery view
//! - [`selections`] - favorite toggling
//! - [`photos`] - comments, finished assets, deletion
//! - [`galleries`] - gallery management, public stock view, leads export
//! - [`services`] - booking catalog
//! - [`orders`] - order and payment reconciliation
//! - [`downloads`] - download permission gate
//! - [`shared_albums`] - guest email wall

pub mod appointments;
pub mod auth;
pub mod downloads;
pub mod galleries;
pub mod health;
pub mod orders;
pub mod photos;
pub mod selections;
pub mod services;
pub mod session_gallery;
pub mod shared_albums;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(appointments::router())
        .merge(session_gallery::router())
        .merge(selections::router())
        .merge(photos::router())
        .merge(galleries::router())
        .merge(services::router())
        .merge(orders::router())
        .merge(downloads::router())
        .merge(shared_albums::router())
}

/// Build the fully configured application.
///
/// Layer order matters: the tenant resolver is added last so it runs
/// first, giving the auth middleware a resolved [`crate::tenant::TenantContext`]
/// to check tokens against.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // ========== Application Middleware ==========
        // Admin JWT authentication (skips public client routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        // Tenant resolution - outermost, runs first
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::tenant::resolve_tenant_middleware,
        ))
}
