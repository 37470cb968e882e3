//! Domain parser
//!
//! Turns raw Atmos output into domain types:
//! - `describe stacks --format=json` → `Stack`
//! - `list components --format=json` → `Component`
//! - workflow definition YAML files → `Workflow`

pub mod stack_name;

pub use stack_name::{PositionalNaming, StackNaming};

use keel_core::domain::component::{Component, ComponentType};
use keel_core::domain::stack::Stack;
use keel_core::domain::workflow::{Workflow, WorkflowStep};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Malformed output from Atmos or from a workflow file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid component listing entry {entry}: {reason}")]
    ComponentEntry { entry: String, reason: String },

    #[error("invalid workflow file {file}: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
}

// =============================================================================
// Stacks
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawStack {
    #[serde(default)]
    components: Option<RawStackComponents>,
    #[serde(default)]
    vars: Option<Map<String, Value>>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStackComponents {
    #[serde(default)]
    terraform: Option<Map<String, Value>>,
    #[serde(default)]
    helmfile: Option<Map<String, Value>>,
}

/// Parses the `describe stacks` listing, a JSON object keyed by stack name
pub fn parse_stacks(raw: &str, naming: &dyn StackNaming) -> Result<Vec<Stack>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Atmos output order is kept
    let listing: IndexMap<String, Option<RawStack>> =
        serde_json::from_str(raw).map_err(|source| ParseError::Json {
            what: "stack listing",
            source,
        })?;

    let stacks = listing
        .into_iter()
        .map(|(name, raw)| {
            let raw = raw.unwrap_or_default();
            let mut stack = Stack::new(name.as_str(), naming.decompose(&name));

            let mut components = BTreeSet::new();
            if let Some(attached) = raw.components {
                components.extend(attached.terraform.unwrap_or_default().into_iter().map(|(k, _)| k));
                components.extend(attached.helmfile.unwrap_or_default().into_iter().map(|(k, _)| k));
            }

            stack.components = components.into_iter().collect();
            stack.variables = raw.vars.unwrap_or_default();
            stack.metadata = raw.metadata.unwrap_or_default();
            stack
        })
        .collect();

    Ok(stacks)
}

// =============================================================================
// Components
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawComponent {
    name: String,
    #[serde(rename = "type", default)]
    component_type: Option<ComponentType>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    variables: Option<Map<String, Value>>,
    #[serde(default)]
    outputs: Option<Map<String, Value>>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// Parses the `list components` listing, a JSON array
///
/// Entries may be full objects or bare component names. Entries are decoded
/// one at a time so an error names the entry at fault.
pub fn parse_components(raw: &str) -> Result<Vec<Component>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<Value> = serde_json::from_str(raw).map_err(|source| ParseError::Json {
        what: "component listing",
        source,
    })?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_component_entry(index, entry))
        .collect()
}

fn parse_component_entry(index: usize, entry: Value) -> Result<Component, ParseError> {
    match entry {
        Value::String(name) => Ok(Component {
            name,
            component_type: ComponentType::default(),
            path: String::new(),
            description: String::new(),
            variables: Map::new(),
            outputs: Map::new(),
            metadata: Map::new(),
        }),
        Value::Object(object) => {
            let entry = match object.get("name").and_then(Value::as_str) {
                Some(name) => format!("'{}'", name),
                None => format!("#{}", index),
            };
            let raw: RawComponent = serde_json::from_value(Value::Object(object))
                .map_err(|e| ParseError::ComponentEntry {
                    entry,
                    reason: e.to_string(),
                })?;

            Ok(Component {
                name: raw.name,
                component_type: raw.component_type.unwrap_or_default(),
                path: raw.path.unwrap_or_default(),
                description: raw.description.unwrap_or_default(),
                variables: raw.variables.unwrap_or_default(),
                outputs: raw.outputs.unwrap_or_default(),
                metadata: raw.metadata.unwrap_or_default(),
            })
        }
        other => Err(ParseError::ComponentEntry {
            entry: format!("#{}", index),
            reason: format!("expected a name or an object, found {}", other),
        }),
    }
}

// =============================================================================
// Workflows
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawWorkflowFile {
    #[serde(default)]
    workflows: Option<serde_yaml::Mapping>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWorkflow {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    steps: Option<Vec<WorkflowStep>>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// A workflow definition file: its name and YAML content
#[derive(Debug, Clone)]
pub struct WorkflowFile {
    pub name: String,
    pub content: String,
}

impl WorkflowFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Flattens every entry under `workflows:` in every file
///
/// Files are processed in the order given and entries keep their order
/// within a file.
pub fn parse_workflows(files: &[WorkflowFile]) -> Result<Vec<Workflow>, ParseError> {
    let mut workflows = Vec::new();

    for file in files {
        if file.content.trim().is_empty() {
            continue;
        }

        let yaml_error = |source: serde_yaml::Error| ParseError::Yaml {
            file: file.name.clone(),
            source,
        };

        let parsed: RawWorkflowFile = serde_yaml::from_str(&file.content).map_err(yaml_error)?;

        for (key, value) in parsed.workflows.unwrap_or_default() {
            let name = match key {
                serde_yaml::Value::String(name) => name,
                other => serde_yaml::to_string(&other)
                    .map_err(yaml_error)?
                    .trim()
                    .to_string(),
            };

            let raw: RawWorkflow = if value.is_null() {
                RawWorkflow::default()
            } else {
                serde_yaml::from_value(value).map_err(yaml_error)?
            };

            workflows.push(Workflow {
                name,
                description: raw.description.unwrap_or_default(),
                steps: raw.steps.unwrap_or_default(),
                file: file.name.clone(),
                metadata: raw.metadata.unwrap_or_default(),
            });
        }
    }

    Ok(workflows)
}
