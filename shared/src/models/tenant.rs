//! Tenant Model
//!
//! Root scoping entity. Every other table carries a `tenant_id` foreign key
//! and all reads/writes filter by it.

use serde::{Deserialize, Serialize};

/// Subscription plan tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Studio,
}

/// Subscription status
///
/// `Cancelled` tenants are denied outright at resolution time;
/// `Paused` tenants are read-only except their billing path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SubscriptionStatus {
    Active,
    #[default]
    Trial,
    Paused,
    Cancelled,
}

/// Tenant entity (one photographer's studio)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub subdomain: String,
    pub custom_domain: Option<String>,
    pub plan_tier: PlanTier,
    pub subscription_status: SubscriptionStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
