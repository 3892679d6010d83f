//! Guest Lead Model
//!
//! Captured at the shared-album email wall. Written unconditionally on every
//! unlock - repeat emails insert new rows; dedup is a reporting concern.

use serde::{Deserialize, Serialize};

/// Guest lead entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GuestLead {
    pub id: i64,
    pub tenant_id: i64,
    pub gallery_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub viewed_at: i64,
}

/// Email-wall payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRegister {
    pub email: String,
    pub name: Option<String>,
    pub relationship: Option<String>,
}

/// What a guest receives after passing the wall: the shared album view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGranted {
    pub appointment_id: i64,
    pub gallery_id: i64,
    pub gallery_name: String,
    pub photos: Vec<super::photo::PhotoForClient>,
}
