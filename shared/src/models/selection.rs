//! Selection Model
//!
//! A (photo, client) favorite mark. UNIQUE(photo_id, client_email) - toggling
//! re-uses the row, so double-clicks are idempotent. Approval is not recorded
//! here; it lives on the appointment.

use serde::{Deserialize, Serialize};

/// Selection entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Selection {
    pub id: i64,
    pub tenant_id: i64,
    pub photo_id: i64,
    pub client_email: String,
    pub is_favorite: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Toggle payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionToggle {
    pub photo_id: i64,
    pub client_email: String,
    pub is_selected: bool,
}
