//! Gallery & Photo Store (client-facing operations)
//!
//! Favorite toggling, comments, and the client session-gallery view. This
//! layer returns every asset URL it knows; which of them the caller may
//! honor is decided by the download permission gate, consulted by the API
//! layer - keeping the asset-serving policy in one place.

use serde::Serialize;
use shared::models::{
    Appointment, Comment, CommentCreate, Gallery, PhotoForClient, Selection, SelectionToggle,
};

use crate::core::ServerState;
use crate::db::repository::{
    appointment as appointment_repo, comment as comment_repo, gallery as gallery_repo,
    photo as photo_repo, selection as selection_repo,
};
use crate::lifecycle::authorize_client_access;
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// Client view of a session gallery.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGalleryView {
    pub gallery: Gallery,
    pub photos: Vec<PhotoForClient>,
    pub appointment: Appointment,
}

/// Resolve a photo to its session appointment and authorize the supplied
/// client email against it. Standalone galleries have no client identity
/// to check against, so selection/comment writes on them are not available.
async fn authorize_photo_access(
    state: &ServerState,
    ctx: &TenantContext,
    photo_id: i64,
    client_email: &str,
) -> AppResult<(i64, Appointment)> {
    let photo = photo_repo::find_by_id(&state.pool, ctx.tenant_id, photo_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Photo {photo_id}")))?;
    ensure_tenant(ctx, photo.tenant_id)?;

    let gallery = gallery_repo::find_by_id(&state.pool, ctx.tenant_id, photo.gallery_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Gallery {}", photo.gallery_id)))?;
    ensure_tenant(ctx, gallery.tenant_id)?;

    let Some(appointment_id) = gallery.appointment_id else {
        return Err(AppError::not_found("This album is not available"));
    };
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;
    ensure_tenant(ctx, appointment.tenant_id)?;
    authorize_client_access(&appointment, client_email)?;

    Ok((photo.id, appointment))
}

/// The session gallery for an appointment, scoped to its client.
pub async fn get_for_client(
    state: &ServerState,
    ctx: &TenantContext,
    appointment_id: i64,
    client_email: &str,
) -> AppResult<SessionGalleryView> {
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;
    ensure_tenant(ctx, appointment.tenant_id)?;
    authorize_client_access(&appointment, client_email)?;

    let gallery = gallery_repo::find_by_appointment(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found("No gallery for this appointment yet"))?;

    let photos = photo_repo::list_for_client(
        &state.pool,
        ctx.tenant_id,
        gallery.id,
        &appointment.client_email,
    )
    .await?;

    Ok(SessionGalleryView {
        gallery,
        photos,
        appointment,
    })
}

/// Idempotent favorite toggle keyed on (photo, client email).
pub async fn toggle_selection(
    state: &ServerState,
    ctx: &TenantContext,
    data: SelectionToggle,
) -> AppResult<Selection> {
    let email = data.client_email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Client email must not be empty"));
    }

    let (photo_id, appointment) =
        authorize_photo_access(state, ctx, data.photo_id, email).await?;

    selection_repo::upsert_toggle(
        &state.pool,
        ctx.tenant_id,
        photo_id,
        &appointment.client_email,
        data.is_selected,
    )
    .await
    .map_err(Into::into)
}

/// Append a comment. Empty bodies are rejected; there is no moderation
/// gate and no edit path.
pub async fn add_comment(
    state: &ServerState,
    ctx: &TenantContext,
    photo_id: i64,
    data: CommentCreate,
) -> AppResult<Comment> {
    if data.body.trim().is_empty() {
        return Err(AppError::validation("Comment must not be empty"));
    }

    let (photo_id, appointment) =
        authorize_photo_access(state, ctx, photo_id, &data.client_email).await?;

    comment_repo::create(
        &state.pool,
        ctx.tenant_id,
        photo_id,
        &appointment.client_email,
        data.body.trim(),
    )
    .await
    .map_err(Into::into)
}
