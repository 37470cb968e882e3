//! Platform API Handlers
//!
//! Atmos configuration and aggregate metrics.

use axum::{Json, extract::State};
use keel_core::domain::config::AtmosConfig;
use keel_core::domain::metrics::PlatformMetrics;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::metrics;

/// GET /config
/// Parsed `atmos.yaml`
pub async fn get_config(State(state): State<AppState>) -> ApiResult<Json<AtmosConfig>> {
    tracing::debug!("Getting Atmos configuration");

    let config = state
        .settings
        .load()
        .await
        .map_err(|e| ApiError::internal("Failed to get configuration", e))?;

    Ok(Json(config))
}

/// GET /metrics
/// Aggregate stack, component and workflow counts
pub async fn get_metrics(State(state): State<AppState>) -> ApiResult<Json<PlatformMetrics>> {
    tracing::debug!("Collecting platform metrics");

    let metrics = metrics::collect(&state.catalog, &state.workflows)
        .await
        .map_err(|e| ApiError::internal("Failed to get metrics", e))?;

    Ok(Json(metrics))
}
