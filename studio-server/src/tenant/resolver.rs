//! Tenant Context Resolver
//!
//! `resolve(hostname)` maps `<subdomain>.<platform_domain>` or a registered
//! custom domain to the owning tenant. Cancelled subscriptions are a hard
//! deny; paused subscriptions flag the context read-only.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::core::ServerState;
use crate::db::repository::tenant as tenant_repo;
use crate::security_log;
use crate::utils::{AppError, AppResult};
use shared::models::{PlanTier, SubscriptionStatus, Tenant};

/// Resolved tenant scope, threaded explicitly through every core call.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: i64,
    pub subdomain: String,
    pub plan_tier: PlanTier,
    pub subscription_status: SubscriptionStatus,
}

impl TenantContext {
    pub fn from_tenant(t: &Tenant) -> Self {
        Self {
            tenant_id: t.id,
            subdomain: t.subdomain.clone(),
            plan_tier: t.plan_tier,
            subscription_status: t.subscription_status,
        }
    }

    /// Paused tenants may read but not write (billing path excepted).
    pub fn is_read_only(&self) -> bool {
        self.subscription_status == SubscriptionStatus::Paused
    }
}

/// Strip an optional port and lowercase the host.
fn normalize_host(host: &str) -> String {
    host.split(':').next().unwrap_or(host).to_ascii_lowercase()
}

/// Resolve a request hostname to its tenant.
///
/// Unknown hosts and cancelled tenants both produce `NotFound` - the
/// resolver fails closed and reveals nothing about why.
pub async fn resolve(state: &ServerState, hostname: &str) -> AppResult<TenantContext> {
    let host = normalize_host(hostname);

    let suffix = format!(".{}", state.config.platform_domain);
    let tenant = if let Some(subdomain) = host.strip_suffix(&suffix) {
        // Exactly one label: "alice.lumen.photos", not "x.alice.lumen.photos"
        if subdomain.is_empty() || subdomain.contains('.') {
            None
        } else {
            tenant_repo::find_by_subdomain(&state.pool, subdomain).await?
        }
    } else {
        tenant_repo::find_by_custom_domain(&state.pool, &host).await?
    };

    let Some(tenant) = tenant else {
        return Err(AppError::not_found("Unknown studio"));
    };

    if tenant.subscription_status == SubscriptionStatus::Cancelled {
        security_log!(
            "WARN",
            "cancelled_tenant_denied",
            tenant_id = tenant.id,
            host = host.clone()
        );
        return Err(AppError::not_found("Unknown studio"));
    }

    Ok(TenantContext::from_tenant(&tenant))
}

/// Whether a mutating request on a paused tenant may still pass: the
/// tenant's own billing/reactivation path and the login that reaches it.
fn is_paused_exempt(path: &str) -> bool {
    path.starts_with("/api/billing") || path == "/api/auth/login"
}

/// Tenant resolution middleware.
///
/// Runs before authentication. Resolves the Host header, injects
/// [`TenantContext`], and enforces the paused-tenant write lockout.
/// `/api/health` is platform-level and skips resolution.
pub async fn resolve_tenant_middleware(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    if !path.starts_with("/api/") || path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::not_found("Unknown studio"))?;

    let ctx = resolve(&state, host).await?;

    let mutating = !matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    if ctx.is_read_only() && mutating && !is_paused_exempt(&path) {
        return Err(AppError::forbidden(
            "Subscription paused - reactivate billing to make changes",
        ));
    }

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
