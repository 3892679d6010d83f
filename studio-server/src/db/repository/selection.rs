//! Selection Repository
//!
//! Favorites are keyed UNIQUE(photo_id, client_email); toggling is an
//! upsert on that key, so concurrent double-clicks collapse into one row.

use shared::models::Selection;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const SELECTION_SELECT: &str = "SELECT id, tenant_id, photo_id, client_email, is_favorite, created_at, updated_at FROM selection";

pub async fn find_by_photo_client(
    pool: &SqlitePool,
    tenant_id: i64,
    photo_id: i64,
    client_email: &str,
) -> RepoResult<Option<Selection>> {
    let sql = format!("{SELECTION_SELECT} WHERE tenant_id = ? AND photo_id = ? AND client_email = ?");
    let row = sqlx::query_as::<_, Selection>(&sql)
        .bind(tenant_id)
        .bind(photo_id)
        .bind(client_email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Idempotent favorite toggle. The conflict arm only fires when the stored
/// state differs, so re-sending the same value leaves the row (including
/// `updated_at`) untouched.
pub async fn upsert_toggle(
    pool: &SqlitePool,
    tenant_id: i64,
    photo_id: i64,
    client_email: &str,
    is_selected: bool,
) -> RepoResult<Selection> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO selection (id, tenant_id, photo_id, client_email, is_favorite, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) ON CONFLICT(photo_id, client_email) DO UPDATE SET is_favorite = excluded.is_favorite, updated_at = excluded.updated_at WHERE selection.is_favorite != excluded.is_favorite",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(photo_id)
    .bind(client_email)
    .bind(is_selected)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_photo_client(pool, tenant_id, photo_id, client_email)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert selection".into()))
}

/// Favorites the appointment's client has marked across the linked
/// session gallery.
pub async fn count_favorites_for_appointment(
    pool: &SqlitePool,
    tenant_id: i64,
    appointment_id: i64,
    client_email: &str,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM selection s JOIN photo p ON s.photo_id = p.id JOIN gallery g ON p.gallery_id = g.id WHERE g.tenant_id = ? AND g.appointment_id = ? AND s.client_email = ? AND s.is_favorite = 1",
    )
    .bind(tenant_id)
    .bind(appointment_id)
    .bind(client_email)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Favorited photos still missing their finished counterpart - the
/// delivery guard's blocker count.
pub async fn count_unfinished_favorites(
    pool: &SqlitePool,
    tenant_id: i64,
    appointment_id: i64,
    client_email: &str,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM selection s JOIN photo p ON s.photo_id = p.id JOIN gallery g ON p.gallery_id = g.id WHERE g.tenant_id = ? AND g.appointment_id = ? AND s.client_email = ? AND s.is_favorite = 1 AND p.edited_url IS NULL",
    )
    .bind(tenant_id)
    .bind(appointment_id)
    .bind(client_email)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
