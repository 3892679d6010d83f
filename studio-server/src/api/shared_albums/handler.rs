//! Guest wall handler

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::models::{AccessGranted, GuestRegister};

use crate::core::ServerState;
use crate::guests;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/shared/{slug}/access - unlock a shared album
///
/// Writes a guest lead unconditionally and returns the album view. One-way
/// wall: no re-authentication within the same access.
pub async fn register_guest(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(slug): Path<String>,
    Json(payload): Json<GuestRegister>,
) -> AppResult<Json<AppResponse<AccessGranted>>> {
    let granted = guests::register_guest(&state, &ctx, &slug, payload)
        .await
        .map_err(AppError::mask_for_client)?;
    Ok(ok(granted))
}
