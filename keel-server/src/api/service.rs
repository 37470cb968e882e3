//! Service Provisioning API Handler

use axum::{Json, body::Bytes, extract::State};
use keel_core::dto::service::ProvisionResponse;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::schema;
use crate::service::provision;

/// POST /services/provision
/// Provision a service environment through the onboarding workflow
pub async fn provision_service(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProvisionResponse>> {
    let req = schema::json_body(&body)
        .and_then(|value| schema::service_request(&value))
        .map_err(|violations| ApiError::bad_request("Invalid service request", violations))?;

    Ok(Json(provision::provision(&state.workflows, req).await))
}
