//! Stack and component endpoints

use crate::KeelClient;
use crate::error::Result;
use keel_core::domain::component::Component;
use keel_core::domain::stack::Stack;
use keel_core::domain::validation::{ComponentValidationResult, StackValidationResult};
use keel_core::dto::validation::ValidateComponent;

impl KeelClient {
    // =============================================================================
    // Stacks
    // =============================================================================

    /// List all stacks
    pub async fn list_stacks(&self) -> Result<Vec<Stack>> {
        self.get(&["stacks"]).await
    }

    /// Get a stack by name
    ///
    /// An unknown stack is an `ApiError` with status 404.
    pub async fn get_stack(&self, name: &str) -> Result<Stack> {
        self.get(&["stacks", name]).await
    }

    /// Validate a stack
    pub async fn validate_stack(&self, name: &str) -> Result<StackValidationResult> {
        self.post(&["stacks", name, "validate"], &serde_json::json!({}))
            .await
    }

    // =============================================================================
    // Components
    // =============================================================================

    /// List all components
    pub async fn list_components(&self) -> Result<Vec<Component>> {
        self.get(&["components"]).await
    }

    /// Get a component by name
    pub async fn get_component(&self, name: &str) -> Result<Component> {
        self.get(&["components", name]).await
    }

    /// Validate a component, optionally within one stack
    pub async fn validate_component(
        &self,
        name: &str,
        stack: Option<&str>,
    ) -> Result<ComponentValidationResult> {
        let body = ValidateComponent {
            stack: stack.map(str::to_string),
        };
        self.post(&["components", name, "validate"], &body).await
    }
}
