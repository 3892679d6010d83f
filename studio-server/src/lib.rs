//! Lumen Studio Server - multi-tenant booking and delivery platform for
//! photography studios
//!
//! # Architecture overview
//!
//! - **Tenant resolution** (`tenant`): host → explicit `TenantContext`
//! - **Database** (`db`): SQLite (sqlx) with per-entity repositories
//! - **Lifecycle** (`lifecycle`): appointment state machine + approval gate
//! - **Galleries** (`galleries`): favorites, comments, client views
//! - **Downloads** (`downloads`): original-vs-watermarked permission gate
//! - **Orders** (`orders`): payment reconciliation state machine
//! - **Guests** (`guests`): shared-album email wall
//! - **Auth** (`auth`): JWT + Argon2 admin authentication
//! - **HTTP API** (`api`): axum routers, one module per resource
//!
//! # Module structure
//!
//! ```text
//! studio-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, passwords, middleware
//! ├── tenant/        # tenant resolution and scoping
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer
//! ├── lifecycle/     # appointment state machine
//! ├── galleries/     # gallery & photo store
//! ├── downloads/     # download permission gate
//! ├── orders/        # order & payment reconciliation
//! ├── guests/        # guest access wall
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod downloads;
pub mod galleries;
pub mod guests;
pub mod lifecycle;
pub mod orders;
pub mod tenant;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use tenant::TenantContext;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Audit logging macro - permanent record of business mutations
/// (status transitions, payments, deletions). Routed to the `audit`
/// target stream, which the logger writes to its own never-deleted file.
#[macro_export]
macro_rules! audit_log {
    ($user:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user = %$user,
            action = %$action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($user:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user = %$user,
            action = %$action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}

/// Security logging macro - auth failures, cross-tenant denials
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = %$value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __
   / /   __  ______ ___  ___  ____
  / /   / / / / __ `__ \/ _ \/ __ \
 / /___/ /_/ / / / / / /  __/ / / /
/_____/\__,_/_/ /_/ /_/\___/_/ /_/
        studio server
    "#
    );
}

/// Prepare the process environment: dotenv, then logging.
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    let log_dir = config.log_dir();
    utils::logger::init_logger_with_file(
        &config.log_level,
        config.is_production(),
        log_dir.to_str(),
    )
}
