//! Session gallery handler - the client-facing gallery view.
//!
//! This is the caller the store leaves URL policy to: it consults the
//! download permission gate and strips full-resolution URLs on denial.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::downloads;
use crate::galleries::{self, SessionGalleryView};
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Deserialize)]
pub struct ClientQuery {
    pub email: String,
}

/// GET /api/session-gallery/{appointment_id}?email= - client gallery view
pub async fn get_for_client(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(appointment_id): Path<i64>,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<AppResponse<SessionGalleryView>>> {
    let mut view = galleries::get_for_client(&state, &ctx, appointment_id, &query.email)
        .await
        .map_err(AppError::mask_for_client)?;

    let permission = downloads::check_permission(&state, &ctx, view.gallery.id)
        .await
        .map_err(AppError::mask_for_client)?;
    downloads::apply_policy(&mut view.photos, &permission);

    Ok(ok(view))
}
