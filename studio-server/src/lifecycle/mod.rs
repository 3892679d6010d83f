//! Appointment Lifecycle
//!
//! Admin-driven status transitions over the ordered chain
//! `PENDING → … → DELIVERED`. Guarded edges carry their guard inside the
//! compare-and-swap UPDATE itself, so a precondition can't be raced away
//! between check and write. The `AWAITING_SELECTION → FINAL_EDITING` edge
//! is owned by the approval gate ([`approval`]) and rejected here.

pub mod approval;

pub use approval::{approve_selection, authorize_client_access};

use shared::models::{Appointment, AppointmentStatus};

use crate::audit_log;
use crate::core::ServerState;
use crate::db::repository::{
    appointment as appointment_repo, photo as photo_repo, selection as selection_repo,
};
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// Apply an admin-requested status change.
///
/// A rejected transition leaves every field exactly as it was - the status
/// write is a single guarded UPDATE, and zero affected rows is classified
/// back into the precise error.
pub async fn update_status(
    state: &ServerState,
    ctx: &TenantContext,
    appointment_id: i64,
    new_status: AppointmentStatus,
    actor: &str,
) -> AppResult<Appointment> {
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;
    ensure_tenant(ctx, appointment.tenant_id)?;

    let current = appointment.status;

    if !current.admin_can_transition(new_status) {
        if current == AppointmentStatus::AwaitingSelection
            && new_status == AppointmentStatus::FinalEditing
        {
            return Err(AppError::invalid_state(
                "Selection approval is performed by the client, not by a status change",
            ));
        }
        return Err(AppError::invalid_state(format!(
            "Cannot move appointment from {current:?} to {new_status:?}"
        )));
    }

    let affected = match new_status {
        AppointmentStatus::AwaitingSelection => {
            appointment_repo::transition_to_awaiting_selection(
                &state.pool,
                ctx.tenant_id,
                appointment_id,
            )
            .await?
        }
        AppointmentStatus::Delivered => {
            appointment_repo::transition_to_delivered(
                &state.pool,
                ctx.tenant_id,
                appointment_id,
                &appointment.client_email,
            )
            .await?
        }
        _ => {
            appointment_repo::transition_status(
                &state.pool,
                ctx.tenant_id,
                appointment_id,
                current,
                new_status,
            )
            .await?
        }
    };

    if affected == 0 {
        return Err(classify_rejection(state, ctx, &appointment, new_status).await?);
    }

    audit_log!(
        actor,
        "status_change",
        &format!("appointment:{appointment_id}"),
        &format!("{current:?} -> {new_status:?}")
    );

    appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))
}

/// A guarded CAS wrote nothing - work out which rule stopped it so the
/// caller gets the specific error, not a generic conflict.
async fn classify_rejection(
    state: &ServerState,
    ctx: &TenantContext,
    appointment: &Appointment,
    new_status: AppointmentStatus,
) -> AppResult<AppError> {
    match new_status {
        AppointmentStatus::AwaitingSelection => {
            let photos =
                photo_repo::count_for_appointment(&state.pool, ctx.tenant_id, appointment.id)
                    .await?;
            if photos == 0 {
                return Ok(AppError::PreconditionFailed(
                    "No photos uploaded to the session gallery yet".to_string(),
                ));
            }
        }
        AppointmentStatus::Delivered => {
            let unfinished = selection_repo::count_unfinished_favorites(
                &state.pool,
                ctx.tenant_id,
                appointment.id,
                &appointment.client_email,
            )
            .await?;
            if unfinished > 0 {
                return Ok(AppError::IncompleteDelivery(format!(
                    "{unfinished} favorited photo(s) still missing a finished asset"
                )));
            }
        }
        _ => {}
    }
    Ok(AppError::invalid_state(format!(
        "Appointment {} was modified concurrently",
        appointment.id
    )))
}
