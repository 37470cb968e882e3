//! Error types for the Keel client

use keel_core::dto::error::{ErrorBody, FieldViolation};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Keel client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
        /// Field-level violations of a rejected request body
        details: Vec<FieldViolation>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Create an API error from a raw error response body
    ///
    /// Structured bodies contribute their message and violations; anything
    /// else is kept as plain text.
    pub fn from_body(status: u16, text: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => Self::ApiError {
                status,
                message: format!("{}: {}", body.error, body.message),
                details: body.details,
            },
            Err(_) if text.trim().is_empty() => Self::api_error(status, "Unknown error"),
            Err(_) => Self::api_error(status, text.trim()),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Field violations of a 400 response, empty otherwise
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::ApiError { details, .. } => details,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_structured_body() {
        let err = ClientError::from_body(
            400,
            r#"{"error":"Invalid workflow request","message":"workflow: is required","details":[{"field":"workflow","message":"is required"}]}"#,
        );

        assert!(err.is_client_error());
        assert_eq!(err.violations().len(), 1);
        assert_eq!(
            err.to_string(),
            "API error (status 400): Invalid workflow request: workflow: is required"
        );
    }

    #[test]
    fn test_from_plain_body() {
        let err = ClientError::from_body(502, "Bad Gateway\n");
        assert!(err.is_server_error());
        assert!(err.violations().is_empty());
        assert_eq!(err.to_string(), "API error (status 502): Bad Gateway");

        let err = ClientError::from_body(404, "");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error (status 404): Unknown error");
    }
}
