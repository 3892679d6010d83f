//! Unified Error Handling
//!
//! Provides the application error type and response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code families
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Business | E0003 not found, E0405 invalid transition |
//! | E2xxx  | Permission | E2001 forbidden |
//! | E3xxx  | Authentication | E3001 not logged in |
//! | E9xxx  | System | E9002 database error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 on success)
    pub code: String,
    /// Message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// Every variant is terminal - nothing is silently retried inside the core.
/// A rejected state transition leaves all persisted fields exactly as they
/// were.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business Logic (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity exists but belongs to a different tenant. Rendered to the
    /// wire as a generic 404 - existence of other tenants' data is never
    /// revealed.
    #[error("Cross-tenant access: {0}")]
    CrossTenant(String),

    /// Attempted transition not permitted from the current state.
    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    /// A state-machine guard was not satisfied (e.g. no photos uploaded).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Selection approval requested with zero favorites.
    #[error("No selection: {0}")]
    NoSelection(String),

    /// Delivery requested while favorited photos lack finished assets.
    #[error("Incomplete delivery: {0}")]
    IncompleteDelivery(String),

    /// Mutation attempted on a terminal/completed record.
    #[error("Immutable state: {0}")]
    ImmutableState(String),

    // ========== System (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "E3001", "Please login first".to_string())
            }
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "E3003", "Token expired".to_string())
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "E3002", "Invalid token".to_string())
            }

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            // Cross-tenant access is reported exactly like a missing
            // resource on the wire, and logged to the security stream.
            AppError::CrossTenant(msg) => {
                crate::security_log!(
                    "WARN",
                    "cross_tenant_denied",
                    detail = msg.clone()
                );
                (
                    StatusCode::NOT_FOUND,
                    "E0003",
                    "Resource not found".to_string(),
                )
            }

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            // State machine violations
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, "E0405", msg.clone()),
            AppError::PreconditionFailed(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0406", msg.clone())
            }
            AppError::NoSelection(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0407", msg.clone())
            }
            AppError::IncompleteDelivery(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0408", msg.clone())
            }
            AppError::ImmutableState(msg) => (StatusCode::CONFLICT, "E0409", msg.clone()),

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Unified message for failed logins, preventing email enumeration.
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid email or password".to_string())
    }

    /// Collapse tenant-revealing errors into the generic client-facing
    /// surface. Client-facing handlers (galleries, approval, guest wall)
    /// route their errors through this so a caller cannot distinguish
    /// "exists elsewhere" from "does not exist".
    pub fn mask_for_client(self) -> Self {
        match self {
            AppError::NotFound(_) | AppError::CrossTenant(_) | AppError::Forbidden(_) => {
                AppError::NotFound("This album is not available".to_string())
            }
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
