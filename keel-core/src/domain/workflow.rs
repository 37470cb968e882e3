//! Workflow domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named, ordered sequence of operational steps
///
/// Workflow names are scoped within their definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    /// Definition file the workflow was read from
    pub file: String,
    pub metadata: Map<String, Value>,
}

/// A single step of a workflow definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Outcome of a workflow execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Error,
    Pending,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Success => write!(f, "success"),
            ExecutionStatus::Error => write!(f, "error"),
            ExecutionStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Result of running a workflow through the Atmos CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionResult {
    pub workflow: String,
    pub status: ExecutionStatus,
    /// Captured stdout
    pub output: String,
    /// Captured stderr, or the failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock milliseconds spent in the invocation
    pub execution_time: u64,
    pub timestamp: DateTime<Utc>,
}

impl WorkflowExecutionResult {
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_uses_type_key() {
        let step: WorkflowStep =
            serde_json::from_value(serde_json::json!({"command": "terraform plan vpc", "type": "atmos"}))
                .unwrap();
        assert_eq!(step.step_type.as_deref(), Some("atmos"));
        assert!(step.name.is_none());

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json, serde_json::json!({"command": "terraform plan vpc", "type": "atmos"}));
    }

    #[test]
    fn test_execution_result_wire_shape() {
        let result = WorkflowExecutionResult {
            workflow: "plan-all".to_string(),
            status: ExecutionStatus::Success,
            output: "done".to_string(),
            error: None,
            execution_time: 12,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["executionTime"], 12);
        assert!(json.get("error").is_none());
        assert!(result.is_success());
    }
}
