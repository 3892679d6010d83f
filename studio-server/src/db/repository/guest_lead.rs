//! Guest Lead Repository
//!
//! Inserts are unconditional - the email wall records every unlock, repeat
//! emails included.

use shared::models::GuestLead;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn create(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
    email: &str,
    name: Option<&str>,
    relationship: Option<&str>,
) -> RepoResult<GuestLead> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO guest_lead (id, tenant_id, gallery_id, email, name, relationship, viewed_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(gallery_id)
    .bind(email)
    .bind(name)
    .bind(relationship)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, GuestLead>(
        "SELECT id, tenant_id, gallery_id, email, name, relationship, viewed_at FROM guest_lead WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::Database("Failed to record guest lead".into()))
}

/// Marketing export, newest first.
pub async fn list_by_gallery(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
) -> RepoResult<Vec<GuestLead>> {
    let rows = sqlx::query_as::<_, GuestLead>(
        "SELECT id, tenant_id, gallery_id, email, name, relationship, viewed_at FROM guest_lead WHERE tenant_id = ? AND gallery_id = ? ORDER BY viewed_at DESC",
    )
    .bind(tenant_id)
    .bind(gallery_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
