//! Repository Module
//!
//! Row-level access to the SQLite tables, one module per entity. Every
//! function takes the owning `tenant_id` and scopes its statements by it -
//! cross-tenant lookups fail closed with `RepoError::NotFound` at this
//! layer, refined into `CrossTenant` by the services where the distinction
//! matters.

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

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::utils::AppError::NotFound(msg),
            RepoError::Duplicate(msg) => crate::utils::AppError::Conflict(msg),
            RepoError::Validation(msg) => crate::utils::AppError::Validation(msg),
            RepoError::Database(msg) => crate::utils::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
