//! Selection toggle handler

use axum::{
    Json,
    extract::{Extension, State},
};
use shared::models::{Selection, SelectionToggle};

use crate::core::ServerState;
use crate::galleries;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/selections/toggle - idempotent favorite upsert
pub async fn toggle(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<SelectionToggle>,
) -> AppResult<Json<AppResponse<Selection>>> {
    let selection = galleries::toggle_selection(&state, &ctx, payload)
        .await
        .map_err(AppError::mask_for_client)?;
    Ok(ok(selection))
}
