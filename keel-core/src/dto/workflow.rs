//! Workflow execution DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to run a workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionRequest {
    pub workflow: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Passed to the workflow as `key=value` tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub dry_run: bool,
    /// Timeout override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl WorkflowExecutionRequest {
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_defaults_to_false() {
        let req: WorkflowExecutionRequest =
            serde_json::from_value(serde_json::json!({"workflow": "plan-all"})).unwrap();
        assert!(!req.dry_run);
        assert!(req.parameters.is_none());
        assert_eq!(req, WorkflowExecutionRequest::new("plan-all"));
    }
}
