//! Data models
//!
//! Shared between studio-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! UTC epoch milliseconds.

pub mod appointment;
pub mod comment;
pub mod gallery;
pub mod guest_lead;
pub mod order;
pub mod photo;
pub mod selection;
pub mod service;
pub mod studio_user;
pub mod tenant;

// Re-exports
pub use appointment::*;
pub use comment::*;
pub use gallery::*;
pub use guest_lead::*;
pub use order::*;
pub use photo::*;
pub use selection::*;
pub use service::*;
pub use studio_user::*;
pub use tenant::*;
