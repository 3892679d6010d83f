//! Admin login handler

use axum::{Json, extract::{Extension, State}};
use shared::models::{LoginRequest, LoginResponse};

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::db::repository::studio_user;
use crate::security_log;
use crate::tenant::TenantContext;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/auth/login - issue an admin token for this tenant
///
/// Failure is uniform (`invalid_credentials`) whether the email is unknown,
/// inactive, or the password wrong.
pub async fn login(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let email = payload.email.trim().to_ascii_lowercase();

    let user = studio_user::find_by_email(&state.pool, ctx.tenant_id, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        security_log!(
            "WARN",
            "login_failed",
            tenant_id = ctx.tenant_id,
            email = email.clone()
        );
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(tenant_id = ctx.tenant_id, user_id = user.id, "Admin login");

    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}
