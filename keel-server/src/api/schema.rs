//! Request schemas
//!
//! Bodies are checked field by field so a 400 can list every violation at
//! once. Identifiers end up as whitespace-separated tokens on the Atmos
//! command line, so they must be non-empty single tokens.

use keel_core::dto::error::FieldViolation;
use keel_core::dto::service::ServiceRequest;
use keel_core::dto::validation::ValidateComponent;
use keel_core::dto::workflow::WorkflowExecutionRequest;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::service::provision::render_parameter;

pub type Violations = Vec<FieldViolation>;

/// Decodes a raw request body; an empty body decodes to `null`
pub fn json_body(bytes: &[u8]) -> Result<Value, Violations> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
        .map_err(|e| vec![FieldViolation::new("body", format!("malformed JSON: {}", e))])
}

/// Checks that `value` can be passed as a single command-line token
pub fn token(field: &str, value: &str) -> Option<FieldViolation> {
    if value.is_empty() {
        Some(FieldViolation::new(field, "must not be empty"))
    } else if value.chars().any(char::is_whitespace) {
        Some(FieldViolation::new(field, "must not contain whitespace"))
    } else {
        None
    }
}

/// Schema of `POST /workflows/execute`
pub fn workflow_request(body: &Value) -> Result<WorkflowExecutionRequest, Violations> {
    let mut fields = Fields::new(body)?;

    let workflow = fields.required_token("workflow");
    let stack = fields.optional_token("stack");
    let parameters = fields.parameters("parameters");
    let dry_run = fields.optional_bool("dryRun").unwrap_or(false);
    let timeout = fields.optional_timeout("timeout");

    fields.finish(|| WorkflowExecutionRequest {
        workflow: workflow.unwrap_or_default(),
        stack,
        parameters,
        dry_run,
        timeout,
    })
}

/// Schema of `POST /services/provision`
pub fn service_request(body: &Value) -> Result<ServiceRequest, Violations> {
    let mut fields = Fields::new(body)?;

    let service_name = fields.required_string("serviceName");
    let template = fields.required_string("template");
    let tenant = fields.required_token("tenant");
    let account = fields.required_token("account");
    let environment = fields.required_token("environment");
    let region = fields.optional_token("region");
    let parameters = fields.required_object("parameters");
    let metadata = fields.optional_object("metadata");

    if let Some(parameters) = &parameters {
        for (key, value) in parameters {
            fields.check_parameter(&format!("parameters.{}", key), key, &render_parameter(value));
        }
    }

    fields.finish(|| ServiceRequest {
        service_name: service_name.unwrap_or_default(),
        template: template.unwrap_or_default(),
        tenant: tenant.unwrap_or_default(),
        account: account.unwrap_or_default(),
        environment: environment.unwrap_or_default(),
        region,
        parameters: parameters.unwrap_or_default(),
        metadata,
    })
}

/// Schema of the optional `POST /components/{name}/validate` body
pub fn component_validation(body: &Value) -> Result<ValidateComponent, Violations> {
    if body.is_null() {
        return Ok(ValidateComponent::default());
    }

    let mut fields = Fields::new(body)?;
    let stack = fields.optional_token("stack");
    fields.finish(|| ValidateComponent { stack })
}

/// Field-by-field reader over a JSON object that accumulates violations
struct Fields<'a> {
    object: &'a Map<String, Value>,
    violations: Violations,
}

impl<'a> Fields<'a> {
    fn new(body: &'a Value) -> Result<Self, Violations> {
        match body.as_object() {
            Some(object) => Ok(Self {
                object,
                violations: Vec::new(),
            }),
            None => Err(vec![FieldViolation::new("body", "expected a JSON object")]),
        }
    }

    fn reject(&mut self, field: &str, message: &str) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// Present and non-null value of a field
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|v| !v.is_null())
    }

    fn required_string(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None => {
                self.reject(field, "is required");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(field, "expected a string");
                None
            }
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(field, "expected a string");
                None
            }
        }
    }

    fn required_token(&mut self, field: &str) -> Option<String> {
        let value = self.required_string(field)?;
        self.check_token(field, value)
    }

    fn optional_token(&mut self, field: &str) -> Option<String> {
        let value = self.optional_string(field)?;
        self.check_token(field, value)
    }

    fn check_token(&mut self, field: &str, value: String) -> Option<String> {
        match token(field, &value) {
            Some(violation) => {
                self.violations.push(violation);
                None
            }
            None => Some(value),
        }
    }

    fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.get(field) {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.reject(field, "expected a boolean");
                None
            }
        }
    }

    fn optional_timeout(&mut self, field: &str) -> Option<u64> {
        let value = self.get(field)?;
        match value.as_u64() {
            Some(ms) if ms > 0 => Some(ms),
            _ => {
                self.reject(field, "expected a positive integer number of milliseconds");
                None
            }
        }
    }

    fn required_object(&mut self, field: &str) -> Option<Map<String, Value>> {
        match self.get(field) {
            None => {
                self.reject(field, "is required");
                None
            }
            Some(value) => self.object_value(field, value),
        }
    }

    fn optional_object(&mut self, field: &str) -> Option<Map<String, Value>> {
        let value = self.get(field)?;
        self.object_value(field, value)
    }

    fn object_value(&mut self, field: &str, value: &Value) -> Option<Map<String, Value>> {
        match value.as_object() {
            Some(object) => Some(object.clone()),
            None => {
                self.reject(field, "expected an object");
                None
            }
        }
    }

    /// Optional string-to-string map of workflow parameters
    fn parameters(&mut self, field: &str) -> Option<BTreeMap<String, String>> {
        let object = self.optional_object(field)?;

        let mut parameters = BTreeMap::new();
        for (key, value) in object {
            let path = format!("{}.{}", field, key);
            match value {
                Value::String(s) => {
                    if self.check_parameter(&path, &key, &s) {
                        parameters.insert(key, s);
                    }
                }
                _ => self.reject(&path, "expected a string"),
            }
        }

        Some(parameters)
    }

    /// Checks a `key=value` parameter; returns whether it is acceptable
    fn check_parameter(&mut self, path: &str, key: &str, value: &str) -> bool {
        let mut ok = true;
        if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
            self.reject(path, "key must be a non-empty token without '='");
            ok = false;
        }
        if let Some(violation) = token(path, value) {
            self.violations.push(violation);
            ok = false;
        }
        ok
    }

    fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, Violations> {
        if self.violations.is_empty() {
            Ok(build())
        } else {
            Err(self.violations)
        }
    }
}
