//! Appointment Repository
//!
//! Status mutations are single-statement compare-and-swap UPDATEs: the
//! expected current state (and, for guarded edges, the guard itself) lives
//! in the WHERE clause. A racing writer observes zero affected rows instead
//! of clobbering the machine, and a reader can never see a half-applied
//! transition.

use shared::models::{Appointment, AppointmentCreate, AppointmentStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const APPOINTMENT_SELECT: &str = "SELECT id, tenant_id, service_id, client_name, client_email, client_phone, scheduled_at, status, final_price, paid_amount, payment_status, payment_method, paid_at, selection_approved, selection_approved_at, share_slug, notes, created_at, updated_at FROM appointment";

pub async fn find_all(pool: &SqlitePool, tenant_id: i64) -> RepoResult<Vec<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE tenant_id = ? ORDER BY scheduled_at DESC");
    let rows = sqlx::query_as::<_, Appointment>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
) -> RepoResult<Option<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Appointment>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_share_slug(
    pool: &SqlitePool,
    tenant_id: i64,
    slug: &str,
) -> RepoResult<Option<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE tenant_id = ? AND share_slug = ?");
    let row = sqlx::query_as::<_, Appointment>(&sql)
        .bind(tenant_id)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a booking request. Status starts at `PENDING`; the final price is
/// captured from the service at creation time.
pub async fn create(
    pool: &SqlitePool,
    tenant_id: i64,
    data: AppointmentCreate,
    final_price: f64,
) -> RepoResult<Appointment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO appointment (id, tenant_id, service_id, client_name, client_email, client_phone, scheduled_at, status, final_price, paid_amount, payment_status, selection_approved, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, 'PENDING', ?, 0, 'UNPAID', 0, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(data.service_id)
    .bind(&data.client_name)
    .bind(&data.client_email)
    .bind(&data.client_phone)
    .bind(data.scheduled_at)
    .bind(final_price)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create appointment".into()))
}

/// Unguarded compare-and-swap transition (the edges without preconditions,
/// plus cancellation). Returns affected rows: 0 means the appointment was
/// no longer in `from` and nothing was written.
pub async fn transition_status(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE appointment SET status = ?, updated_at = ? WHERE tenant_id = ? AND id = ? AND status = ?",
    )
    .bind(to)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// `EDITING → AWAITING_SELECTION`, guarded in-statement: the linked session
/// gallery must hold at least one photo.
pub async fn transition_to_awaiting_selection(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE appointment SET status = 'AWAITING_SELECTION', updated_at = ? \
         WHERE tenant_id = ? AND id = ? AND status = 'EDITING' \
         AND EXISTS (SELECT 1 FROM photo p JOIN gallery g ON p.gallery_id = g.id WHERE g.appointment_id = appointment.id)",
    )
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// `FINAL_EDITING → DELIVERED`, guarded in-statement: no favorited photo of
/// the client may still be missing its finished asset.
pub async fn transition_to_delivered(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    client_email: &str,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE appointment SET status = 'DELIVERED', updated_at = ? \
         WHERE tenant_id = ? AND id = ? AND status = 'FINAL_EDITING' \
         AND NOT EXISTS (SELECT 1 FROM selection s JOIN photo p ON s.photo_id = p.id JOIN gallery g ON p.gallery_id = g.id \
                         WHERE g.appointment_id = appointment.id AND s.client_email = ? AND s.is_favorite = 1 AND p.edited_url IS NULL)",
    )
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .bind(client_email)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// The approval gate's paired write: flag, timestamp and status move in one
/// statement, with the favorites guard folded into the WHERE clause. 0
/// affected rows means a concurrent call already approved, the state moved
/// on, or the client has no favorites - the caller re-reads to classify.
pub async fn approve_selection_cas(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    client_email: &str,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE appointment SET status = 'FINAL_EDITING', selection_approved = 1, selection_approved_at = ?, updated_at = ? \
         WHERE tenant_id = ? AND id = ? AND status = 'AWAITING_SELECTION' AND selection_approved = 0 \
         AND EXISTS (SELECT 1 FROM selection s JOIN photo p ON s.photo_id = p.id JOIN gallery g ON p.gallery_id = g.id \
                     WHERE g.appointment_id = appointment.id AND s.client_email = ? AND s.is_favorite = 1)",
    )
    .bind(now)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .bind(client_email)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Assign the public sharing slug for the guest-accessible final album.
pub async fn set_share_slug(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    slug: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE appointment SET share_slug = ?, updated_at = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(slug)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Appointment {id} not found")));
    }
    Ok(())
}
