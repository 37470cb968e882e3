//! API Error Handling
//!
//! Unified error type and conversion to HTTP responses. Every error body
//! carries a categorical `error` label and a human-readable `message`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use keel_core::dto::error::{ErrorBody, FieldViolation};

/// Named resources that can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stack,
    Component,
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// The named resource is absent from the current listing
    NotFound { resource: Resource, name: String },
    /// The request failed schema validation
    BadRequest {
        label: &'static str,
        violations: Vec<FieldViolation>,
    },
    /// A downstream component failed; the message is surfaced as-is
    Internal { label: &'static str, message: String },
}

impl ApiError {
    pub fn not_found(resource: Resource, name: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            name: name.into(),
        }
    }

    pub fn bad_request(label: &'static str, violations: Vec<FieldViolation>) -> Self {
        ApiError::BadRequest { label, violations }
    }

    pub fn internal(label: &'static str, err: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            label,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound { resource, name } => {
                tracing::warn!("{:?} not found: {}", resource, name);
                let (label, message) = match resource {
                    Resource::Stack => ("Stack not found", format!("Stack '{}' not found", name)),
                    Resource::Component => (
                        "Component not found",
                        format!("Component '{}' not found", name),
                    ),
                };
                let mut body = error_body(label, message);
                match resource {
                    Resource::Stack => body.stack = Some(name),
                    Resource::Component => body.component = Some(name),
                }
                (StatusCode::NOT_FOUND, body)
            }
            ApiError::BadRequest { label, violations } => {
                let message = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!("{}: {}", label, message);
                let mut body = error_body(label, message);
                body.details = violations;
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Internal { label, message } => {
                tracing::error!("{}: {}", label, message);
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(label, message))
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(label: &str, message: String) -> ErrorBody {
    ErrorBody {
        error: label.to_string(),
        message,
        details: Vec::new(),
        stack: None,
        component: None,
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
