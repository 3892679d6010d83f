//! JWT token service
//!
//! Issues and validates HS256 admin tokens for studio users. A token is
//! bound to the tenant it was issued under; the auth middleware rejects
//! tokens presented against a different tenant's host.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::{StudioRole, StudioUser};
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes in production)
    pub secret: String,
    /// Token lifetime in hours
    pub ttl_hours: i64,
    /// Token issuer
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if s.len() >= 32 => s,
            Ok(_) => {
                tracing::warn!("JWT_SECRET shorter than 32 bytes; generating a process-local key");
                generated_secret()
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set; generating a process-local key (tokens will not survive restarts)");
                generated_secret()
            }
        };

        Self {
            secret,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "studio-server".to_string()),
        }
    }
}

fn generated_secret() -> String {
    use rand::Rng;
    let bytes: Vec<u8> = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(48)
        .collect();
    String::from_utf8(bytes).unwrap_or_else(|_| "studio-dev-secret-do-not-use-in-prod".into())
}

/// Claims carried by an admin token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Studio user ID (subject)
    pub sub: String,
    /// Tenant the token was issued under
    pub tenant_id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role (OWNER | STAFF)
    pub role: StudioRole,
    /// Expiry (epoch seconds)
    pub exp: i64,
    /// Issued at (epoch seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT service
#[derive(Debug)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a studio user.
    pub fn generate_token(&self, user: &StudioUser) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.role,
            exp: (now + Duration::hours(self.config.ttl_hours)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the bearer token from an `Authorization` header value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated admin, injected into request extensions by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub tenant_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: StudioRole,
}

impl CurrentUser {
    pub fn is_owner(&self) -> bool {
        self.role == StudioRole::Owner
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = std::num::ParseIntError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.sub.parse()?,
            tenant_id: claims.tenant_id,
            email: claims.email,
            display_name: claims.name,
            role: claims.role,
        })
    }
}
