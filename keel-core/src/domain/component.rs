//! Component domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A reusable infrastructure module attachable to stacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub path: String,
    pub description: String,
    pub variables: Map<String, Value>,
    pub outputs: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

/// Provisioner that owns a component
///
/// Types Atmos reports beyond the known ones are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    #[default]
    Terraform,
    Helmfile,
    Spacelift,
    Other(String),
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "terraform" => ComponentType::Terraform,
            "helmfile" => ComponentType::Helmfile,
            "spacelift" => ComponentType::Spacelift,
            _ => ComponentType::Other(value),
        }
    }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::Terraform => write!(f, "terraform"),
            ComponentType::Helmfile => write!(f, "helmfile"),
            ComponentType::Spacelift => write!(f, "spacelift"),
            ComponentType::Other(other) => write!(f, "{}", other),
        }
    }
}
