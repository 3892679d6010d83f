//! Order & Payment Reconciliation
//!
//! Purchase orders (stock photos or paid gallery checkouts) and their
//! manually-driven payment status machine. Payment confirmation is an
//! administrator observing an external gateway and telling the system -
//! there is no webhook. Every transition re-checks the current status
//! inside the statement that performs the update.

pub mod money;

use shared::models::{Order, OrderCreate, OrderDetail, OrderStatus};

use crate::audit_log;
use crate::core::ServerState;
use crate::db::repository::{gallery as gallery_repo, order as order_repo, photo as photo_repo};
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// Create an order with captured line-item prices.
///
/// Write-path revalidation: the linked gallery and every referenced photo
/// are looked up under the caller's tenant immediately before the insert.
pub async fn create_order(
    state: &ServerState,
    ctx: &TenantContext,
    data: OrderCreate,
    actor: &str,
) -> AppResult<OrderDetail> {
    if data.items.is_empty() {
        return Err(AppError::validation("Order must contain at least one line item"));
    }
    if data.customer_email.trim().is_empty() {
        return Err(AppError::validation("Customer email must not be empty"));
    }

    let discount = data.discount_amount.unwrap_or(0.0);
    let final_amount = money::compute_final_amount(&data.items, discount)?;

    if let Some(gallery_id) = data.gallery_id {
        let gallery = gallery_repo::find_by_id(&state.pool, ctx.tenant_id, gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Gallery {gallery_id}")))?;
        ensure_tenant(ctx, gallery.tenant_id)?;
    }
    for item in &data.items {
        let photo = photo_repo::find_by_id(&state.pool, ctx.tenant_id, item.photo_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Photo {}", item.photo_id)))?;
        ensure_tenant(ctx, photo.tenant_id)?;
    }

    let order = order_repo::create_with_items(
        &state.pool,
        ctx.tenant_id,
        &data.customer_name,
        &data.customer_email,
        data.gallery_id,
        &data.items,
        discount,
        final_amount,
        data.payment_method.as_deref(),
    )
    .await?;

    audit_log!(
        actor,
        "order_created",
        &format!("order:{}", order.id),
        &format!("{} item(s), total {final_amount}", data.items.len())
    );

    let items = order_repo::items_by_order(&state.pool, ctx.tenant_id, order.id).await?;
    Ok(OrderDetail { order, items })
}

/// Attach (or replace) an externally-pasted payment link.
///
/// Allowed only while `PENDING`; the status is never changed by this call.
pub async fn attach_payment_link(
    state: &ServerState,
    ctx: &TenantContext,
    order_id: i64,
    url: &str,
) -> AppResult<Order> {
    let order = order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    ensure_tenant(ctx, order.tenant_id)?;

    if order.status != OrderStatus::Pending {
        return Err(AppError::invalid_state(format!(
            "Payment links can only be attached while PENDING, order is {:?}",
            order.status
        )));
    }

    let affected = order_repo::attach_payment_link(&state.pool, ctx.tenant_id, order_id, url).await?;
    if affected == 0 {
        return Err(AppError::invalid_state(
            "Order left PENDING while the link was being attached".to_string(),
        ));
    }

    order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))
}

/// Manual payment confirmation: `PENDING → PAID`, `paid_at` stamped.
///
/// Two concurrent confirms race on the guarded UPDATE; exactly one sees an
/// affected row, the other reports `InvalidState` without touching
/// `paid_at`.
pub async fn confirm_payment(
    state: &ServerState,
    ctx: &TenantContext,
    order_id: i64,
    actor: &str,
) -> AppResult<Order> {
    let order = order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    ensure_tenant(ctx, order.tenant_id)?;

    if order.status != OrderStatus::Pending {
        return Err(AppError::invalid_state(format!(
            "Order is {:?}, only PENDING orders can be confirmed",
            order.status
        )));
    }

    let affected = order_repo::confirm_payment_cas(&state.pool, ctx.tenant_id, order_id).await?;
    if affected == 0 {
        // The guarded UPDATE saw a non-PENDING row: a concurrent confirm
        // or cancellation won. paid_at was not touched by this call.
        return Err(AppError::invalid_state(
            "Order was confirmed or cancelled concurrently".to_string(),
        ));
    }

    audit_log!(actor, "payment_confirmed", &format!("order:{order_id}"));

    order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))
}

/// Admin fulfillment transitions: `PROCESSING`, `COMPLETED`, `CANCELLED`.
///
/// Cancelling an already-cancelled order is an idempotent no-op; anything
/// touching a `COMPLETED` order is `ImmutableState`. `PAID` is reserved
/// for [`confirm_payment`], which also stamps `paid_at`.
pub async fn update_status(
    state: &ServerState,
    ctx: &TenantContext,
    order_id: i64,
    new_status: OrderStatus,
    actor: &str,
) -> AppResult<Order> {
    let order = order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    ensure_tenant(ctx, order.tenant_id)?;

    let current = order.status;

    if new_status == OrderStatus::Cancelled && current == OrderStatus::Cancelled {
        return Ok(order);
    }
    if current == OrderStatus::Completed {
        return Err(AppError::ImmutableState(
            "Completed orders cannot be reverted".to_string(),
        ));
    }
    if new_status == OrderStatus::Paid {
        return Err(AppError::invalid_state(
            "Use payment confirmation to mark an order paid".to_string(),
        ));
    }
    if !current.can_transition(new_status) {
        return Err(AppError::invalid_state(format!(
            "Cannot move order from {current:?} to {new_status:?}"
        )));
    }

    let affected =
        order_repo::transition_status(&state.pool, ctx.tenant_id, order_id, current, new_status)
            .await?;
    if affected == 0 {
        return Err(AppError::invalid_state(format!(
            "Order {order_id} was modified concurrently"
        )));
    }

    audit_log!(
        actor,
        "order_status_change",
        &format!("order:{order_id}"),
        &format!("{current:?} -> {new_status:?}")
    );

    order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))
}

/// Order with line items.
pub async fn get_detail(
    state: &ServerState,
    ctx: &TenantContext,
    order_id: i64,
) -> AppResult<OrderDetail> {
    let order = order_repo::find_by_id(&state.pool, ctx.tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    ensure_tenant(ctx, order.tenant_id)?;
    let items = order_repo::items_by_order(&state.pool, ctx.tenant_id, order_id).await?;
    Ok(OrderDetail { order, items })
}
