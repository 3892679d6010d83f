//! Comment Repository (append-only)

use shared::models::Comment;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COMMENT_SELECT: &str =
    "SELECT id, tenant_id, photo_id, client_email, body, created_at FROM comment";

pub async fn list_by_photo(
    pool: &SqlitePool,
    tenant_id: i64,
    photo_id: i64,
) -> RepoResult<Vec<Comment>> {
    let sql = format!("{COMMENT_SELECT} WHERE tenant_id = ? AND photo_id = ? ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Comment>(&sql)
        .bind(tenant_id)
        .bind(photo_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: i64,
    photo_id: i64,
    client_email: &str,
    body: &str,
) -> RepoResult<Comment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO comment (id, tenant_id, photo_id, client_email, body, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(photo_id)
    .bind(client_email)
    .bind(body)
    .bind(now)
    .execute(pool)
    .await?;

    let sql = format!("{COMMENT_SELECT} WHERE tenant_id = ? AND id = ?");
    sqlx::query_as::<_, Comment>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create comment".into()))
}
