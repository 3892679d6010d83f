//! Service Model (booking catalog)

use serde::{Deserialize, Serialize};

/// Bookable service (e.g. "Newborn session", "Wedding package")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub duration_minutes: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create service payload
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub duration_minutes: i64,
}

/// Update service payload
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub is_active: Option<bool>,
}
