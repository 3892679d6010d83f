//! Service Repository (booking catalog)

use shared::models::{Service, ServiceCreate, ServiceUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const SERVICE_SELECT: &str = "SELECT id, tenant_id, name, description, base_price, duration_minutes, is_active, created_at, updated_at FROM service";

pub async fn find_all(pool: &SqlitePool, tenant_id: i64) -> RepoResult<Vec<Service>> {
    let sql = format!("{SERVICE_SELECT} WHERE tenant_id = ? AND is_active = 1 ORDER BY name ASC");
    let rows = sqlx::query_as::<_, Service>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<Option<Service>> {
    let sql = format!("{SERVICE_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Service>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, tenant_id: i64, data: ServiceCreate) -> RepoResult<Service> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO service (id, tenant_id, name, description, base_price, duration_minutes, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(data.duration_minutes)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    data: ServiceUpdate,
) -> RepoResult<Service> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE service SET name = COALESCE(?, name), description = COALESCE(?, description), base_price = COALESCE(?, base_price), duration_minutes = COALESCE(?, duration_minutes), is_active = COALESCE(?, is_active), updated_at = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(data.duration_minutes)
    .bind(data.is_active)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))
}
