//! Stack domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A deployable bundle of components scoped to a tenant/account/environment/region
///
/// The scoping fields are derived from the stack name on a best-effort basis
/// and are empty strings when the name does not follow a known layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    pub tenant: String,
    pub account: String,
    pub environment: String,
    pub region: String,
    /// Names of the components attached to this stack
    pub components: Vec<String>,
    pub variables: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

impl Stack {
    /// Builds a stack from its name, scoping coordinates and raw attributes
    pub fn new(name: impl Into<String>, coordinates: StackCoordinates) -> Self {
        Self {
            name: name.into(),
            tenant: coordinates.tenant,
            account: coordinates.account,
            environment: coordinates.environment,
            region: coordinates.region,
            components: Vec::new(),
            variables: Map::new(),
            metadata: Map::new(),
        }
    }

    /// Scoping coordinates of this stack
    pub fn coordinates(&self) -> StackCoordinates {
        StackCoordinates {
            tenant: self.tenant.clone(),
            account: self.account.clone(),
            environment: self.environment.clone(),
            region: self.region.clone(),
        }
    }
}

/// Tenant/account/environment/region extracted from a stack name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackCoordinates {
    pub tenant: String,
    pub account: String,
    pub environment: String,
    pub region: String,
}

impl StackCoordinates {
    /// True when no coordinate could be determined
    pub fn is_empty(&self) -> bool {
        self.tenant.is_empty()
            && self.account.is_empty()
            && self.environment.is_empty()
            && self.region.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_serializes_flat_coordinates() {
        let stack = Stack::new(
            "acme-core-dev-uw2",
            StackCoordinates {
                tenant: "acme".to_string(),
                account: "core".to_string(),
                environment: "dev".to_string(),
                region: "uw2".to_string(),
            },
        );

        let json = serde_json::to_value(&stack).unwrap();
        assert_eq!(json["tenant"], "acme");
        assert_eq!(json["region"], "uw2");
        assert_eq!(json["components"], serde_json::json!([]));
        assert_eq!(stack.coordinates().account, "core");
    }

    #[test]
    fn test_default_coordinates_are_empty() {
        assert!(StackCoordinates::default().is_empty());
    }
}
