//! Component API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use keel_core::domain::component::Component;
use keel_core::domain::validation::ComponentValidationResult;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult, Resource};
use crate::api::schema;

/// GET /components
/// List all components
pub async fn list_components(State(state): State<AppState>) -> ApiResult<Json<Vec<Component>>> {
    tracing::debug!("Listing components");

    let components = state
        .catalog
        .list_components()
        .await
        .map_err(|e| ApiError::internal("Failed to get components", e))?;

    Ok(Json(components))
}

/// GET /components/{name}
/// Get a component by name
pub async fn get_component(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Component>> {
    tracing::debug!("Getting component: {}", name);

    let component = state
        .catalog
        .find_component(&name)
        .await
        .map_err(|e| ApiError::internal("Failed to get component", e))?;

    component
        .map(Json)
        .ok_or_else(|| ApiError::not_found(Resource::Component, name))
}

/// POST /components/{name}/validate
/// Validate a component, optionally within a stack
pub async fn validate_component(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ComponentValidationResult>> {
    let invalid = |violations: schema::Violations| {
        ApiError::bad_request("Invalid component validation request", violations)
    };

    let req = schema::json_body(&body)
        .and_then(|value| schema::component_validation(&value))
        .map_err(invalid)?;
    if let Some(violation) = schema::token("name", &name) {
        return Err(invalid(vec![violation]));
    }

    tracing::info!(
        "Validating component: {} (stack: {})",
        name,
        req.stack.as_deref().unwrap_or("-")
    );

    Ok(Json(
        state
            .validation
            .validate_component(&name, req.stack.as_deref())
            .await,
    ))
}
