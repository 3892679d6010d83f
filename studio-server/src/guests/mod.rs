//! Guest Access Wall
//!
//! Shared final albums are reachable by slug behind a one-way email wall:
//! every unlock writes a GuestLead row (marketing export, not access
//! control) and returns the album. No re-authentication within the same
//! access.

use shared::models::{AccessGranted, AppointmentStatus, GuestRegister};

use crate::core::ServerState;
use crate::db::repository::{
    appointment as appointment_repo, gallery as gallery_repo, guest_lead as guest_lead_repo,
    photo as photo_repo,
};
use crate::downloads;
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// Unlock a shared album.
///
/// The lead row is written unconditionally - repeat emails insert again;
/// dedup is a reporting concern. Unknown slugs and cancelled appointments
/// surface identically as not-available.
pub async fn register_guest(
    state: &ServerState,
    ctx: &TenantContext,
    slug: &str,
    data: GuestRegister,
) -> AppResult<AccessGranted> {
    let email = data.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }

    let appointment = appointment_repo::find_by_share_slug(&state.pool, ctx.tenant_id, slug)
        .await?
        .ok_or_else(|| AppError::not_found("This album is not available"))?;
    ensure_tenant(ctx, appointment.tenant_id)?;

    if appointment.status == AppointmentStatus::Cancelled {
        return Err(AppError::not_found("This album is not available"));
    }

    let gallery = gallery_repo::find_by_appointment(&state.pool, ctx.tenant_id, appointment.id)
        .await?
        .ok_or_else(|| AppError::not_found("This album is not available"))?;

    guest_lead_repo::create(
        &state.pool,
        ctx.tenant_id,
        gallery.id,
        email,
        data.name.as_deref(),
        data.relationship.as_deref(),
    )
    .await?;

    let mut photos =
        photo_repo::list_for_client(&state.pool, ctx.tenant_id, gallery.id, email).await?;

    let permission = downloads::check_permission(state, ctx, gallery.id).await?;
    downloads::apply_policy(&mut photos, &permission);

    Ok(AccessGranted {
        appointment_id: appointment.id,
        gallery_id: gallery.id,
        gallery_name: gallery.name,
        photos,
    })
}
