//! Photo API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::models::{Comment, CommentCreate, Photo, PhotoEditedUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{comment as comment_repo, photo as photo_repo};
use crate::galleries;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/photos/{id}/comments - client comment (append-only)
pub async fn add_comment(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<AppResponse<Comment>>> {
    let comment = galleries::add_comment(&state, &ctx, id, payload)
        .await
        .map_err(AppError::mask_for_client)?;
    Ok(ok(comment))
}

/// GET /api/photos/{id}/comments - admin review
pub async fn list_comments(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<Comment>>>> {
    let comments = comment_repo::list_by_photo(&state.pool, ctx.tenant_id, id).await?;
    Ok(ok(comments))
}

/// GET /api/photos/{id} - admin detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Photo>>> {
    let photo = photo_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Photo {id}")))?;
    Ok(ok(photo))
}

/// PUT /api/photos/{id}/edited - admin: attach the finished asset
pub async fn set_edited(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<PhotoEditedUpdate>,
) -> AppResult<Json<AppResponse<Photo>>> {
    if payload.edited_url.trim().is_empty() {
        return Err(AppError::validation("edited_url must not be empty"));
    }
    let photo = photo_repo::set_edited_url(&state.pool, ctx.tenant_id, id, &payload.edited_url)
        .await?;
    Ok(ok(photo))
}

/// DELETE /api/photos/{id} - admin; cascades selections and comments
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = photo_repo::delete(&state.pool, ctx.tenant_id, id).await?;
    if deleted {
        crate::audit_log!(
            &current_user.email,
            "photo_deleted",
            &format!("photo:{id}")
        );
    }
    Ok(ok(deleted))
}
