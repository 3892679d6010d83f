//! Shared domain types for the Lumen studio platform.
//!
//! Contains the data models exchanged between the studio server and its
//! clients, plus ID/time utilities. DB row types derive `sqlx::FromRow`
//! behind the `db` feature so API consumers don't pull in sqlx.

pub mod models;
pub mod util;

pub use models::*;
