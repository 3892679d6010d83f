//! Selection-Approval Gate
//!
//! The one-way act of locking in a client's favorites. Owns the
//! `AWAITING_SELECTION → FINAL_EDITING` edge: the approval flag, its
//! timestamp and the status move in a single UPDATE, so no reader can
//! observe an approved appointment still awaiting selection or the
//! reverse.

use shared::models::{Appointment, AppointmentStatus};

use crate::audit_log;
use crate::core::ServerState;
use crate::db::repository::{appointment as appointment_repo, selection as selection_repo};
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// The single audit point for the client trust boundary: galleries and
/// approval are scoped by a bare email match against the appointment's
/// client. Email ownership is not verified anywhere upstream, so every
/// client-facing path must come through here.
///
/// Cancelled appointments revoke client access entirely.
pub fn authorize_client_access(appointment: &Appointment, supplied_email: &str) -> AppResult<()> {
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(AppError::not_found("This album is not available"));
    }
    if !appointment.client_email.eq_ignore_ascii_case(supplied_email.trim()) {
        return Err(AppError::not_found("This album is not available"));
    }
    Ok(())
}

/// Approve the client's current selection.
///
/// Preconditions: caller email matches the appointment's client, status is
/// `AWAITING_SELECTION`, and at least one photo is favorited. Re-invoking
/// after approval returns the existing approval - clients may retry safely.
pub async fn approve_selection(
    state: &ServerState,
    ctx: &TenantContext,
    appointment_id: i64,
    client_email: &str,
) -> AppResult<Appointment> {
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;
    ensure_tenant(ctx, appointment.tenant_id)?;
    authorize_client_access(&appointment, client_email)?;

    // Idempotent retry: already locked in, return as-is.
    if appointment.selection_approved {
        return Ok(appointment);
    }

    if appointment.status != AppointmentStatus::AwaitingSelection {
        return Err(AppError::invalid_state(format!(
            "Appointment is {:?}, selection can only be approved while AWAITING_SELECTION",
            appointment.status
        )));
    }

    let favorites = selection_repo::count_favorites_for_appointment(
        &state.pool,
        ctx.tenant_id,
        appointment_id,
        &appointment.client_email,
    )
    .await?;
    if favorites == 0 {
        return Err(AppError::NoSelection(
            "Mark at least one favorite before approving".to_string(),
        ));
    }

    let affected = appointment_repo::approve_selection_cas(
        &state.pool,
        ctx.tenant_id,
        appointment_id,
        &appointment.client_email,
    )
    .await?;

    let updated = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;

    if affected == 0 {
        // The CAS wrote nothing: a concurrent call already approved (the
        // outcome the caller wanted - return it), or the state moved on.
        if updated.selection_approved {
            return Ok(updated);
        }
        return Err(AppError::invalid_state(
            "Appointment was modified concurrently".to_string(),
        ));
    }

    audit_log!(
        client_email,
        "selection_approved",
        &format!("appointment:{appointment_id}"),
        &format!("{favorites} favorite(s) locked in")
    );

    Ok(updated)
}
