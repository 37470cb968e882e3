//! Service provisioning DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::workflow::WorkflowExecutionResult;

/// High-level request to provision a service environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub service_name: String,
    pub template: String,
    pub tenant: String,
    pub account: String,
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ServiceRequest {
    /// Stack name the provisioned environment is expected to land in
    pub fn stack_name(&self) -> String {
        format!("{}-{}-{}", self.tenant, self.account, self.environment)
    }
}

/// Provisioning state reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionStatus {
    Provisioning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResponse {
    pub service_name: String,
    pub status: ProvisionStatus,
    pub stack: String,
    pub workflow_result: WorkflowExecutionResult,
    pub timestamp: DateTime<Utc>,
}
