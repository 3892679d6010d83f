//! Appointment API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatusUpdate, ApproveSelectionRequest,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{appointment as appointment_repo, service as service_repo};
use crate::lifecycle;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/appointments - public booking request
///
/// The final price is captured from the service's base price at creation;
/// the appointment starts `PENDING` until the studio confirms.
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<Json<AppResponse<Appointment>>> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError::validation("Client name must not be empty"));
    }
    let email = payload.client_email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid client email is required"));
    }

    let service = service_repo::find_by_id(&state.pool, ctx.tenant_id, payload.service_id)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;

    let appointment =
        appointment_repo::create(&state.pool, ctx.tenant_id, payload, service.base_price).await?;

    tracing::info!(
        tenant_id = ctx.tenant_id,
        appointment_id = appointment.id,
        "Booking request received"
    );

    Ok(ok(appointment))
}

/// GET /api/appointments - admin list
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
) -> AppResult<Json<AppResponse<Vec<Appointment>>>> {
    let appointments = appointment_repo::find_all(&state.pool, ctx.tenant_id).await?;
    Ok(ok(appointments))
}

/// GET /api/appointments/{id} - admin detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Appointment>>> {
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {id}")))?;
    Ok(ok(appointment))
}

/// PUT /api/appointments/{id}/status - admin lifecycle transition
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentStatusUpdate>,
) -> AppResult<Json<AppResponse<Appointment>>> {
    let appointment =
        lifecycle::update_status(&state, &ctx, id, payload.status, &current_user.email).await?;
    Ok(ok(appointment))
}

/// POST /api/appointments/{id}/approve-selection - client approval
///
/// Client-facing: failures that would reveal other tenants' data are
/// masked into the generic not-available surface.
pub async fn approve_selection(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<ApproveSelectionRequest>,
) -> AppResult<Json<AppResponse<Appointment>>> {
    let appointment =
        lifecycle::approve_selection(&state, &ctx, id, &payload.client_email)
            .await
            .map_err(AppError::mask_for_client)?;
    Ok(ok(appointment))
}

/// POST /api/appointments/{id}/share-slug - admin: issue the guest album slug
///
/// Idempotent: an existing slug is returned unchanged.
pub async fn issue_share_slug(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Appointment>>> {
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {id}")))?;

    if appointment.share_slug.is_none() {
        let slug = shared::util::public_slug();
        appointment_repo::set_share_slug(&state.pool, ctx.tenant_id, id, &slug).await?;
    }

    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {id}")))?;
    Ok(ok(appointment))
}
