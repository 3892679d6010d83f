//! Order Repository
//!
//! Status transitions re-assert the expected current status inside the
//! UPDATE itself, so two admins racing the same transition cannot both win.

use shared::models::{Order, OrderItem, OrderItemInput, OrderStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ORDER_SELECT: &str = "SELECT id, tenant_id, customer_name, customer_email, gallery_id, discount_amount, final_amount, status, payment_method, payment_link, paid_at, created_at, updated_at FROM studio_order";

const ITEM_SELECT: &str =
    "SELECT id, tenant_id, order_id, photo_id, title, price FROM order_item";

pub async fn find_all(pool: &SqlitePool, tenant_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE tenant_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn items_by_order(
    pool: &SqlitePool,
    tenant_id: i64,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE tenant_id = ? AND order_id = ? ORDER BY id ASC");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(tenant_id)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Whether some order linked to the gallery has settled payment - the
/// download gate's second input.
pub async fn gallery_has_settled_order(
    pool: &SqlitePool,
    tenant_id: i64,
    gallery_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM studio_order WHERE tenant_id = ? AND gallery_id = ? AND status IN ('PAID', 'COMPLETED')",
    )
    .bind(tenant_id)
    .bind(gallery_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Insert the order row and its line items in one transaction.
/// `final_amount` arrives pre-computed (decimal arithmetic happens in the
/// orders service).
pub async fn create_with_items(
    pool: &SqlitePool,
    tenant_id: i64,
    customer_name: &str,
    customer_email: &str,
    gallery_id: Option<i64>,
    items: &[OrderItemInput],
    discount_amount: f64,
    final_amount: f64,
    payment_method: Option<&str>,
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO studio_order (id, tenant_id, customer_name, customer_email, gallery_id, discount_amount, final_amount, status, payment_method, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, 'PENDING', ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(customer_name)
    .bind(customer_email)
    .bind(gallery_id)
    .bind(discount_amount)
    .bind(final_amount)
    .bind(payment_method)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (id, tenant_id, order_id, photo_id, title, price) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(shared::util::snowflake_id())
        .bind(tenant_id)
        .bind(id)
        .bind(item.photo_id)
        .bind(&item.title)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Replace the payment link. Only legal while `PENDING`; the guard lives in
/// the WHERE clause so a stale admin tab cannot attach a link to a paid
/// order. Returns affected rows.
pub async fn attach_payment_link(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    url: &str,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE studio_order SET payment_link = ?, updated_at = ? WHERE tenant_id = ? AND id = ? AND status = 'PENDING'",
    )
    .bind(url)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// `PENDING → PAID` with `paid_at` stamped, all in one statement guarded
/// by the current status. Exactly one of two concurrent confirms can see
/// 1 affected row; the loser's `paid_at` write never happens.
pub async fn confirm_payment_cas(pool: &SqlitePool, tenant_id: i64, id: i64) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE studio_order SET status = 'PAID', paid_at = ?, updated_at = ? WHERE tenant_id = ? AND id = ? AND status = 'PENDING'",
    )
    .bind(now)
    .bind(now)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Generic guarded transition used by the admin status endpoint.
pub async fn transition_status(
    pool: &SqlitePool,
    tenant_id: i64,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE studio_order SET status = ?, updated_at = ? WHERE tenant_id = ? AND id = ? AND status = ?",
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
