//! Atmos CLI configuration (`atmos.yaml`)
//!
//! Sections are carried as they appear in the file so that keys the service
//! does not interpret still reach callers. Accessors read the few keys the
//! service itself depends on and ignore values of an unexpected type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Parsed `atmos.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosConfig {
    #[serde(default = "default_version", deserialize_with = "version_string")]
    pub version: String,
    #[serde(default, deserialize_with = "section")]
    pub components: Map<String, Value>,
    #[serde(default, deserialize_with = "section")]
    pub stacks: Map<String, Value>,
    #[serde(default, deserialize_with = "section")]
    pub workflows: Map<String, Value>,
    #[serde(default, deserialize_with = "section")]
    pub integrations: Map<String, Value>,
    /// Remaining top-level sections (`logs`, `settings`, `schemas`, ...)
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Default for AtmosConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            components: Map::new(),
            stacks: Map::new(),
            workflows: Map::new(),
            integrations: Map::new(),
            other: Map::new(),
        }
    }
}

impl AtmosConfig {
    /// `components.<kind>.base_path`, e.g. kind `terraform`
    pub fn component_base_path(&self, kind: &str) -> Option<&str> {
        self.components
            .get(kind)
            .and_then(|c| c.get("base_path"))
            .and_then(Value::as_str)
    }

    /// `stacks.base_path`
    pub fn stacks_base_path(&self) -> Option<&str> {
        string_key(&self.stacks, "base_path")
    }

    /// `stacks.name_pattern`
    pub fn stack_name_pattern(&self) -> Option<&str> {
        string_key(&self.stacks, "name_pattern")
    }

    /// `workflows.base_path`
    pub fn workflows_base_path(&self) -> Option<&str> {
        string_key(&self.workflows, "base_path")
    }
}

fn string_key<'a>(section: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    section.get(key).and_then(Value::as_str)
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Accepts `version: 1`, `version: 1.2` and `version: "1.2"`
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(text) => text,
        Version::Integer(n) => n.to_string(),
        Version::Float(n) => n.to_string(),
    })
}

/// A section written as `key:` with no body is an empty section
fn section<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
