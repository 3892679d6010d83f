//! Utility module - common types and helpers
//!
//! - [`AppError`] / [`AppResult`] - application error type and alias
//! - [`AppResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use result::AppResult;
