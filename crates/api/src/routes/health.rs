//! Service info and health endpoints.

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use telemetry::{health, metrics};

use crate::response::HealthResponse;

/// GET / - Service info.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "External Link Click Monitor",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// GET /health - Full health check.
pub async fn health_handler() -> Json<HealthResponse> {
    let report = health().report();

    Json(HealthResponse {
        status: format!("{:?}", report.status).to_lowercase(),
        audit_connected: health().audit.is_healthy(),
        artifacts_writable: health().artifacts.is_healthy(),
        snapshots_created: metrics().snapshots_created.get(),
    })
}

/// GET /health/ready - Readiness probe (can accept traffic).
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
