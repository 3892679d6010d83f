//! Order API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatusUpdate};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/orders - admin create
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = orders::create_order(&state, &ctx, payload, &current_user.email).await?;
    Ok(ok(detail))
}

/// GET /api/orders - admin list
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let orders = order_repo::find_all(&state.pool, ctx.tenant_id).await?;
    Ok(ok(orders))
}

/// GET /api/orders/{id} - admin detail with line items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = orders::get_detail(&state, &ctx, id).await?;
    Ok(ok(detail))
}

/// Payment link payload - must be a well-formed URL.
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentLinkPayload {
    #[validate(url(message = "payment link must be a valid URL"))]
    pub url: String,
}

/// POST /api/orders/{id}/payment-link - attach or replace the link
pub async fn attach_payment_link(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentLinkPayload>,
) -> AppResult<Json<AppResponse<Order>>> {
    payload.validate().map_err(AppError::from)?;
    let order = orders::attach_payment_link(&state, &ctx, id, &payload.url).await?;
    Ok(ok(order))
}

/// POST /api/orders/{id}/confirm-payment - manual PENDING → PAID
pub async fn confirm_payment(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = orders::confirm_payment(&state, &ctx, id, &current_user.email).await?;
    Ok(ok(order))
}

/// POST /api/orders/{id}/status - fulfillment transitions
/// (PROCESSING / COMPLETED / CANCELLED)
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order =
        orders::update_status(&state, &ctx, id, payload.status, &current_user.email).await?;
    Ok(ok(order))
}
