//! Health check handler

use axum::Json;
use serde_json::{Value, json};

use crate::utils::{ApiResponse, ok};

/// GET /api/health - liveness probe
pub async fn health() -> Json<ApiResponse<Value>> {
    ok(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}
