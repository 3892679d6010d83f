//! Authentication module
//!
//! - [`JwtService`] - token issuing/validation
//! - [`CurrentUser`] - authenticated admin context
//! - [`require_auth`] / [`require_owner`] - middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{is_public_api_route, require_auth, require_owner};
pub use password::{hash_password, verify_password};
