//! Download permission handler

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::core::ServerState;
use crate::downloads::{self, DownloadPermission};
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/downloads/{gallery_id}/permission - gate check
///
/// Denial is the default state of an unpaid gallery, not an error - the
/// verdict is always a 200 with `allowed` set accordingly.
pub async fn check_permission(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(gallery_id): Path<i64>,
) -> AppResult<Json<AppResponse<DownloadPermission>>> {
    let permission = downloads::check_permission(&state, &ctx, gallery_id)
        .await
        .map_err(AppError::mask_for_client)?;
    Ok(ok(permission))
}
