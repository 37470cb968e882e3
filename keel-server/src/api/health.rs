//! Health Check API Handler

use axum::Json;
use chrono::Utc;
use keel_core::dto::health::HealthStatus;

pub const SERVICE_NAME: &str = "atmos-plugin";

/// GET /health
/// Liveness only; never touches Atmos
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
    })
}
