//! Provision Service
//!
//! Maps a high-level service request onto the `onboard-environment` workflow.
//! The reported status reflects the workflow run only; readiness of the
//! provisioned resources is not polled.

use chrono::Utc;
use keel_core::dto::service::{ProvisionResponse, ProvisionStatus, ServiceRequest};
use keel_core::dto::workflow::WorkflowExecutionRequest;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

use super::WorkflowService;

/// Workflow every provisioning request runs
pub const ONBOARD_WORKFLOW: &str = "onboard-environment";

/// Region used when the request names none
pub const DEFAULT_REGION: &str = "us-west-2";

/// Builds the workflow request for a service request
///
/// Caller parameters override the synthesized tenant/account/environment/region.
pub fn to_workflow_request(request: &ServiceRequest) -> WorkflowExecutionRequest {
    let mut parameters = BTreeMap::new();
    parameters.insert("tenant".to_string(), request.tenant.clone());
    parameters.insert("account".to_string(), request.account.clone());
    parameters.insert("environment".to_string(), request.environment.clone());
    parameters.insert(
        "region".to_string(),
        request
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
    );

    for (key, value) in &request.parameters {
        parameters.insert(key.clone(), render_parameter(value));
    }

    WorkflowExecutionRequest {
        workflow: ONBOARD_WORKFLOW.to_string(),
        stack: None,
        parameters: Some(parameters),
        dry_run: false,
        timeout: None,
    }
}

/// Strings pass through; anything else is rendered as compact JSON
pub fn render_parameter(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Provision a service environment
pub async fn provision(workflows: &WorkflowService, request: ServiceRequest) -> ProvisionResponse {
    info!(
        "Provisioning service {} from template {} into {}",
        request.service_name,
        request.template,
        request.stack_name()
    );

    let workflow_request = to_workflow_request(&request);
    let result = workflows.execute(&workflow_request).await;

    let status = if result.is_success() {
        ProvisionStatus::Provisioning
    } else {
        ProvisionStatus::Error
    };

    ProvisionResponse {
        stack: request.stack_name(),
        service_name: request.service_name,
        status,
        workflow_result: result,
        timestamp: Utc::now(),
    }
}
