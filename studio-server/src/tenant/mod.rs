//! Tenant module
//!
//! Resolves the owning tenant from the request host and threads an explicit
//! [`TenantContext`] through every core call. Nothing in this server reads
//! tenant identity from ambient state.

pub mod resolver;

pub use resolver::{TenantContext, resolve, resolve_tenant_middleware};

use crate::utils::{AppError, AppResult};

/// Assert that an entity fetched from storage belongs to the caller's
/// tenant. Repositories already scope every statement by `tenant_id`; this
/// is the write-path re-validation run immediately before mutating, so a
/// row that somehow crossed the boundary is rejected instead of written.
pub fn ensure_tenant(ctx: &TenantContext, entity_tenant_id: i64) -> AppResult<()> {
    if ctx.tenant_id != entity_tenant_id {
        return Err(AppError::CrossTenant(format!(
            "entity owned by tenant {entity_tenant_id}, request scoped to {}",
            ctx.tenant_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PlanTier, SubscriptionStatus};

    #[test]
    fn mismatched_tenant_fails_closed() {
        let ctx = TenantContext {
            tenant_id: 1,
            subdomain: "alice".into(),
            plan_tier: PlanTier::Pro,
            subscription_status: SubscriptionStatus::Active,
        };
        assert!(ensure_tenant(&ctx, 1).is_ok());
        let err = ensure_tenant(&ctx, 2).unwrap_err();
        assert!(matches!(err, AppError::CrossTenant(_)));
    }
}
