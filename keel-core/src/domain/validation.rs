//! Validation result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of `atmos validate stacks` for one stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackValidationResult {
    pub stack: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of `atmos terraform validate` for one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentValidationResult {
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
