//! Stack API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use keel_core::domain::stack::Stack;
use keel_core::domain::validation::StackValidationResult;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult, Resource};
use crate::api::schema;

/// GET /stacks
/// List all stacks
pub async fn list_stacks(State(state): State<AppState>) -> ApiResult<Json<Vec<Stack>>> {
    tracing::debug!("Listing stacks");

    let stacks = state
        .catalog
        .list_stacks()
        .await
        .map_err(|e| ApiError::internal("Failed to get stacks", e))?;

    Ok(Json(stacks))
}

/// GET /stacks/{name}
/// Get a stack by name
pub async fn get_stack(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Stack>> {
    tracing::debug!("Getting stack: {}", name);

    let stack = state
        .catalog
        .find_stack(&name)
        .await
        .map_err(|e| ApiError::internal("Failed to get stack", e))?;

    stack
        .map(Json)
        .ok_or_else(|| ApiError::not_found(Resource::Stack, name))
}

/// POST /stacks/{name}/validate
/// Validate a stack; an invalid stack is still a 200
pub async fn validate_stack(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<StackValidationResult>> {
    if let Some(violation) = schema::token("name", &name) {
        return Err(ApiError::bad_request("Invalid stack name", vec![violation]));
    }

    tracing::info!("Validating stack: {}", name);
    Ok(Json(state.validation.validate_stack(&name).await))
}
