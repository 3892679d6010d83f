//! Comment Model
//!
//! Append-only client feedback on a photo. Never edited, only created.

use serde::{Deserialize, Serialize};

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: i64,
    pub tenant_id: i64,
    pub photo_id: i64,
    pub client_email: String,
    pub body: String,
    pub created_at: i64,
}

/// Create comment payload
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreate {
    pub client_email: String,
    pub body: String,
}
