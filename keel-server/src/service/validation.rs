//! Validation Service
//!
//! Runs Atmos validation commands and turns the outcome into a result that
//! is `valid` only when the command exits cleanly.

use chrono::Utc;
use keel_core::domain::validation::{ComponentValidationResult, StackValidationResult};
use tracing::{debug, warn};

use crate::executor::AtmosCli;

pub struct ValidationService {
    cli: AtmosCli,
}

impl ValidationService {
    pub fn new(cli: AtmosCli) -> Self {
        Self { cli }
    }

    /// Validate one stack with `atmos validate stacks -s <stack>`
    pub async fn validate_stack(&self, stack: &str) -> StackValidationResult {
        debug!("Validating Atmos stack: {}", stack);

        let command = format!("validate stacks -s {}", stack);
        let (valid, errors, warnings) = match self.cli.run(&command).await {
            Ok(output) => (true, Vec::new(), extract_warnings(&output.stderr)),
            Err(e) => {
                warn!("Stack validation failed for {}: {}", stack, e);
                (false, vec![e.to_string()], Vec::new())
            }
        };

        StackValidationResult {
            stack: stack.to_string(),
            valid,
            errors,
            warnings,
            timestamp: Utc::now(),
        }
    }

    /// Validate one component with `atmos terraform validate <component> [-s <stack>]`
    pub async fn validate_component(
        &self,
        component: &str,
        stack: Option<&str>,
    ) -> ComponentValidationResult {
        debug!(
            "Validating Atmos component: {} (stack: {})",
            component,
            stack.unwrap_or("-")
        );

        let mut command = format!("terraform validate {}", component);
        if let Some(stack) = stack {
            command.push_str(&format!(" -s {}", stack));
        }

        let (valid, errors, warnings) = match self.cli.run(&command).await {
            Ok(output) => (true, Vec::new(), extract_warnings(&output.stderr)),
            Err(e) => {
                warn!(
                    "Component validation failed for {} (stack: {}): {}",
                    component,
                    stack.unwrap_or("-"),
                    e
                );
                (false, vec![e.to_string()], Vec::new())
            }
        };

        ComponentValidationResult {
            component: component.to_string(),
            stack: stack.map(str::to_string),
            valid,
            errors,
            warnings,
            timestamp: Utc::now(),
        }
    }
}

/// Lines of `output` mentioning `Warning:` or `WARN`, trimmed
pub fn extract_warnings(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains("Warning:") || line.contains("WARN"))
        .map(|line| line.trim().to_string())
        .collect()
}
