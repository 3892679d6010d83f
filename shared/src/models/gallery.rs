//! Gallery Model
//!
//! A named set of photos. Linked to one appointment (session gallery) or
//! standalone (sellable stock gallery) when `appointment_id` is NULL.

use serde::{Deserialize, Serialize};

/// Gallery entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Gallery {
    pub id: i64,
    pub tenant_id: i64,
    pub appointment_id: Option<i64>,
    pub name: String,
    pub access_password: Option<String>,
    pub price_per_photo: f64,
    pub downloads_unlocked: bool,
    pub public_slug: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create gallery payload
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryCreate {
    pub appointment_id: Option<i64>,
    pub name: String,
    pub access_password: Option<String>,
    pub price_per_photo: Option<f64>,
}

/// Update gallery payload
///
/// `downloads_unlocked` is the admin override consulted first by the
/// download permission gate.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryUpdate {
    pub name: Option<String>,
    pub access_password: Option<String>,
    pub price_per_photo: Option<f64>,
    pub downloads_unlocked: Option<bool>,
}
