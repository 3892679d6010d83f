//! Studio User Repository

use shared::models::{StudioRole, StudioUser};
use sqlx::SqlitePool;

use super::RepoResult;

const USER_SELECT: &str = "SELECT id, tenant_id, email, display_name, password_hash, role, is_active, created_at, updated_at FROM studio_user";

pub async fn find_by_email(
    pool: &SqlitePool,
    tenant_id: i64,
    email: &str,
) -> RepoResult<Option<StudioUser>> {
    let sql = format!("{USER_SELECT} WHERE tenant_id = ? AND email = ? AND is_active = 1");
    let row = sqlx::query_as::<_, StudioUser>(&sql)
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
) -> RepoResult<Option<StudioUser>> {
    let sql = format!("{USER_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, StudioUser>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: i64,
    email: &str,
    display_name: &str,
    password_hash: &str,
    role: StudioRole,
) -> RepoResult<StudioUser> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO studio_user (id, tenant_id, email, display_name, password_hash, role, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create studio user".into()))
}
