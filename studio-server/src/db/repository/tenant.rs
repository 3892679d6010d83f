//! Tenant Repository
//!
//! Lookup only - tenant provisioning happens upstream of this server.

use shared::models::Tenant;
use sqlx::SqlitePool;

use super::RepoResult;

const TENANT_SELECT: &str = "SELECT id, name, subdomain, custom_domain, plan_tier, subscription_status, created_at, updated_at FROM tenant";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Tenant>> {
    let sql = format!("{TENANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Tenant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_subdomain(pool: &SqlitePool, subdomain: &str) -> RepoResult<Option<Tenant>> {
    let sql = format!("{TENANT_SELECT} WHERE subdomain = ?");
    let row = sqlx::query_as::<_, Tenant>(&sql)
        .bind(subdomain)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_custom_domain(pool: &SqlitePool, domain: &str) -> RepoResult<Option<Tenant>> {
    let sql = format!("{TENANT_SELECT} WHERE custom_domain = ?");
    let row = sqlx::query_as::<_, Tenant>(&sql)
        .bind(domain)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
