//! Workflow API Handlers

use axum::{Json, body::Bytes, extract::State};
use keel_core::domain::workflow::{Workflow, WorkflowExecutionResult};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::schema;

/// GET /workflows
/// List workflow definitions
pub async fn list_workflows(State(state): State<AppState>) -> ApiResult<Json<Vec<Workflow>>> {
    tracing::debug!("Listing workflows");

    let workflows = state
        .catalog
        .list_workflows()
        .await
        .map_err(|e| ApiError::internal("Failed to get workflows", e))?;

    Ok(Json(workflows))
}

/// POST /workflows/execute
/// Run a workflow; a failed run is reported in the result, not as an error
pub async fn execute_workflow(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<WorkflowExecutionResult>> {
    let req = schema::json_body(&body)
        .and_then(|value| schema::workflow_request(&value))
        .map_err(|violations| ApiError::bad_request("Invalid workflow request", violations))?;

    Ok(Json(state.workflows.execute(&req).await))
}
