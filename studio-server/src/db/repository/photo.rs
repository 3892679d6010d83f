//! Photo Repository
//!
//! Photos are exclusively owned by their gallery; deletion cascades
//! selections and comments at the schema level.

use shared::models::{Photo, PhotoCreate, PhotoForClient};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const PHOTO_SELECT: &str = "SELECT id, tenant_id, gallery_id, title, thumbnail_url, preview_url, original_url, edited_url, is_for_sale, price, created_at FROM photo";

pub async fn find_by_id(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<Option<Photo>> {
    let sql = format!("{PHOTO_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Photo>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_gallery(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
) -> RepoResult<Vec<Photo>> {
    let sql = format!("{PHOTO_SELECT} WHERE tenant_id = ? AND gallery_id = ? ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Photo>(&sql)
        .bind(tenant_id)
        .bind(gallery_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Gallery photos with the caller's favorite state and comment counts
/// joined in. URL filtering happens above this layer.
pub async fn list_for_client(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
    client_email: &str,
) -> RepoResult<Vec<PhotoForClient>> {
    let rows = sqlx::query_as::<_, PhotoForClient>(
        "SELECT p.id, p.gallery_id, p.title, p.thumbnail_url, p.preview_url, p.original_url, p.edited_url, p.is_for_sale, p.price, COALESCE(s.is_favorite, 0) AS is_favorite, (SELECT COUNT(*) FROM comment c WHERE c.photo_id = p.id) AS comment_count FROM photo p LEFT JOIN selection s ON s.photo_id = p.id AND s.client_email = ? WHERE p.tenant_id = ? AND p.gallery_id = ? ORDER BY p.created_at ASC",
    )
    .bind(client_email)
    .bind(tenant_id)
    .bind(gallery_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_in_gallery(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM photo WHERE tenant_id = ? AND gallery_id = ?",
    )
    .bind(tenant_id)
    .bind(gallery_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Photos uploaded to the session gallery linked to an appointment -
/// guard input for the `EDITING → AWAITING_SELECTION` transition.
pub async fn count_for_appointment(
    pool: &SqlitePool,
    tenant_id: i64,
    appointment_id: i64,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM photo p JOIN gallery g ON p.gallery_id = g.id WHERE g.tenant_id = ? AND g.appointment_id = ?",
    )
    .bind(tenant_id)
    .bind(appointment_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
    data: PhotoCreate,
) -> RepoResult<Photo> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO photo (id, tenant_id, gallery_id, title, thumbnail_url, preview_url, original_url, is_for_sale, price, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(gallery_id)
    .bind(&data.title)
    .bind(&data.thumbnail_url)
    .bind(&data.preview_url)
    .bind(&data.original_url)
    .bind(data.is_for_sale.unwrap_or(false))
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create photo".into()))
}

/// Attach the finished asset produced during final editing.
pub async fn set_edited_url(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    edited_url: &str,
) -> RepoResult<Photo> {
    let rows = sqlx::query("UPDATE photo SET edited_url = ? WHERE tenant_id = ? AND id = ?")
        .bind(edited_url)
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Photo {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Photo {id} not found")))
}

/// Hard delete; selections and comments cascade.
pub async fn delete(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM photo WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
