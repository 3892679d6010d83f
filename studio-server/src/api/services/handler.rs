//! Service catalog handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::models::{Service, ServiceCreate, ServiceUpdate};

use crate::core::ServerState;
use crate::db::repository::service as service_repo;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/services - public catalog
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
) -> AppResult<Json<AppResponse<Vec<Service>>>> {
    let services = service_repo::find_all(&state.pool, ctx.tenant_id).await?;
    Ok(ok(services))
}

/// POST /api/services - admin create
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<AppResponse<Service>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Service name must not be empty"));
    }
    if payload.base_price < 0.0 || !payload.base_price.is_finite() {
        return Err(AppError::validation("Base price must be non-negative"));
    }
    let service = service_repo::create(&state.pool, ctx.tenant_id, payload).await?;
    Ok(ok(service))
}

/// PUT /api/services/{id} - admin update
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<AppResponse<Service>>> {
    if let Some(price) = payload.base_price
        && (price < 0.0 || !price.is_finite())
    {
        return Err(AppError::validation("Base price must be non-negative"));
    }
    let service = service_repo::update(&state.pool, ctx.tenant_id, id, payload).await?;
    Ok(ok(service))
}
