//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::utils::{AppResponse, ok};

#[derive(Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - liveness probe, platform-level (no tenant scope)
pub async fn health() -> Json<AppResponse<HealthInfo>> {
    ok(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
