//! Studio User Model
//!
//! Admin identities scoped to one tenant. Password hashes never leave the
//! server; the API-facing struct strips them.

use serde::{Deserialize, Serialize};

/// Studio user role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StudioRole {
    Owner,
    #[default]
    Staff,
}

/// Studio user row (includes the password hash, server-side only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StudioUser {
    pub id: i64,
    pub tenant_id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: StudioRole,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Studio user as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioUserInfo {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: StudioRole,
}

impl From<StudioUser> for StudioUserInfo {
    fn from(u: StudioUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
        }
    }
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response (token + profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: StudioUserInfo,
}
