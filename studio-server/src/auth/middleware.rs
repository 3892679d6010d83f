//! Authentication middleware
//!
//! Validates `Authorization: Bearer <token>` on admin API routes and injects
//! [`CurrentUser`] into the request extensions. Client-facing routes
//! (galleries, selections, approval, guest wall) are public within the
//! resolved tenant - their trust boundary is the client email match, not a
//! token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::tenant::TenantContext;
use crate::utils::AppError;

/// Routes reachable without an admin token.
///
/// Method matters: `POST /api/appointments` is a public booking request
/// while `GET /api/appointments` is the admin list.
pub fn is_public_api_route(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }
    match *method {
        Method::GET => {
            path == "/api/health"
                || path == "/api/services"
                || path.starts_with("/api/session-gallery/")
                || path.starts_with("/api/downloads/")
                || path.starts_with("/api/public-galleries/")
        }
        Method::POST => {
            path == "/api/auth/login"
                || path == "/api/appointments"
                || path == "/api/selections/toggle"
                || path.starts_with("/api/shared/")
                || (path.starts_with("/api/appointments/") && path.ends_with("/approve-selection"))
                || (path.starts_with("/api/photos/") && path.ends_with("/comments"))
        }
        _ => false,
    }
}

/// Admin authentication middleware.
///
/// Skips non-API paths and the public client routes; everything else needs
/// a valid token whose tenant matches the resolved [`TenantContext`].
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::InvalidToken)?,
        None => {
            security_log!("WARN", "auth_missing", path = path.clone());
            return Err(AppError::Unauthorized);
        }
    };

    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                path = path.clone()
            );
            return Err(match e {
                crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            });
        }
    };

    let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;

    // A token is only valid for the tenant it was issued under. An admin
    // session spanning multiple tenants must re-authenticate per host.
    if let Some(ctx) = req.extensions().get::<TenantContext>()
        && ctx.tenant_id != user.tenant_id
    {
        security_log!(
            "WARN",
            "token_tenant_mismatch",
            token_tenant = user.tenant_id,
            host_tenant = ctx.tenant_id,
            path = path.clone()
        );
        return Err(AppError::InvalidToken);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Owner-only middleware for destructive admin routes.
pub async fn require_owner(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    if !user.is_owner() {
        security_log!(
            "WARN",
            "owner_required",
            user_id = user.id,
            email = user.email.clone()
        );
        return Err(AppError::forbidden("Owner role required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_is_public_but_listing_is_not() {
        assert!(is_public_api_route(&Method::POST, "/api/appointments"));
        assert!(!is_public_api_route(&Method::GET, "/api/appointments"));
    }

    #[test]
    fn client_routes_are_public() {
        assert!(is_public_api_route(
            &Method::GET,
            "/api/session-gallery/12345?email=a@b.c"
        ));
        assert!(is_public_api_route(&Method::POST, "/api/selections/toggle"));
        assert!(is_public_api_route(
            &Method::POST,
            "/api/appointments/99/approve-selection"
        ));
        assert!(is_public_api_route(&Method::POST, "/api/photos/7/comments"));
        assert!(is_public_api_route(&Method::POST, "/api/shared/abc123/access"));
        assert!(is_public_api_route(&Method::GET, "/api/downloads/5/permission"));
    }

    #[test]
    fn admin_routes_require_auth() {
        assert!(!is_public_api_route(&Method::POST, "/api/orders"));
        assert!(!is_public_api_route(&Method::PUT, "/api/appointments/3/status"));
        assert!(!is_public_api_route(&Method::DELETE, "/api/photos/3"));
        assert!(!is_public_api_route(&Method::POST, "/api/galleries"));
    }
}
