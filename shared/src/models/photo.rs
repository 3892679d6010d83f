//! Photo Model
//!
//! Asset bytes live in an external blob store; rows only carry resolved URLs.
//! `edited_url` is the finished counterpart uploaded during final editing -
//! delivery requires one for every favorited photo.

use serde::{Deserialize, Serialize};

/// Photo entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Photo {
    pub id: i64,
    pub tenant_id: i64,
    pub gallery_id: i64,
    pub title: String,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub original_url: String,
    pub edited_url: Option<String>,
    pub is_for_sale: bool,
    pub price: Option<f64>,
    pub created_at: i64,
}

/// Register photo payload (URLs already resolved by the upload pipeline)
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoCreate {
    pub title: String,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub original_url: String,
    pub is_for_sale: Option<bool>,
    pub price: Option<f64>,
}

/// Attach the finished asset for a photo
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoEditedUpdate {
    pub edited_url: String,
}

/// Photo as served to a client gallery view: selection state and comment
/// count joined in. Full-resolution URLs are stripped by the API layer when
/// the download gate denies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PhotoForClient {
    pub id: i64,
    pub gallery_id: i64,
    pub title: String,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub original_url: Option<String>,
    pub edited_url: Option<String>,
    pub is_for_sale: bool,
    pub price: Option<f64>,
    pub is_favorite: bool,
    pub comment_count: i64,
}
