//! Gallery Repository

use shared::models::{Gallery, GalleryCreate, GalleryUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const GALLERY_SELECT: &str = "SELECT id, tenant_id, appointment_id, name, access_password, price_per_photo, downloads_unlocked, public_slug, created_at, updated_at FROM gallery";

pub async fn find_all(pool: &SqlitePool, tenant_id: i64) -> RepoResult<Vec<Gallery>> {
    let sql = format!("{GALLERY_SELECT} WHERE tenant_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Gallery>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<Option<Gallery>> {
    let sql = format!("{GALLERY_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Gallery>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// The session gallery linked to an appointment, if one exists.
pub async fn find_by_appointment(
    pool: &SqlitePool,
    tenant_id: i64,
    appointment_id: i64,
) -> RepoResult<Option<Gallery>> {
    let sql = format!("{GALLERY_SELECT} WHERE tenant_id = ? AND appointment_id = ?");
    let row = sqlx::query_as::<_, Gallery>(&sql)
        .bind(tenant_id)
        .bind(appointment_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Public stock-gallery lookup by slug (tenant-scoped like everything else).
pub async fn find_by_public_slug(
    pool: &SqlitePool,
    tenant_id: i64,
    slug: &str,
) -> RepoResult<Option<Gallery>> {
    let sql = format!("{GALLERY_SELECT} WHERE tenant_id = ? AND public_slug = ?");
    let row = sqlx::query_as::<_, Gallery>(&sql)
        .bind(tenant_id)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, tenant_id: i64, data: GalleryCreate) -> RepoResult<Gallery> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let slug = shared::util::public_slug();
    sqlx::query(
        "INSERT INTO gallery (id, tenant_id, appointment_id, name, access_password, price_per_photo, downloads_unlocked, public_slug, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(data.appointment_id)
    .bind(&data.name)
    .bind(&data.access_password)
    .bind(data.price_per_photo.unwrap_or(0.0))
    .bind(&slug)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create gallery".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    data: GalleryUpdate,
) -> RepoResult<Gallery> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE gallery SET name = COALESCE(?, name), access_password = COALESCE(?, access_password), price_per_photo = COALESCE(?, price_per_photo), downloads_unlocked = COALESCE(?, downloads_unlocked), updated_at = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.name)
    .bind(&data.access_password)
    .bind(data.price_per_photo)
    .bind(data.downloads_unlocked)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Gallery {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Gallery {id} not found")))
}
