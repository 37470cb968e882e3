//! Validation request DTOs

use serde::{Deserialize, Serialize};

/// Optional body of `POST /components/{name}/validate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
