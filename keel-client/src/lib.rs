//! Keel HTTP Client
//!
//! A type-safe HTTP client for the Keel Atmos API, used by the `keel` CLI.
//!
//! # Example
//!
//! ```no_run
//! use keel_client::KeelClient;
//! use keel_core::dto::workflow::WorkflowExecutionRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KeelClient::new("http://localhost:7007");
//!
//!     let mut request = WorkflowExecutionRequest::new("plan-all");
//!     request.dry_run = true;
//!     let result = client.execute_workflow(&request).await?;
//!
//!     println!("{}: {}", result.workflow, result.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod platform;
mod stacks;
mod workflows;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Path every endpoint lives under
pub const API_PREFIX: &str = "api/atmos";

/// HTTP client for the Keel API
///
/// Endpoints are grouped by concern:
/// - Stacks and components (list, get, validate)
/// - Workflows and service provisioning
/// - Health, configuration and metrics
#[derive(Debug, Clone)]
pub struct KeelClient {
    /// Base URL of the server (e.g., "http://localhost:7007")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl KeelClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use keel_client::KeelClient;
    ///
    /// let client = KeelClient::new("http://localhost:7007");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// Workflow runs can take up to half an hour; configure the request
    /// timeout accordingly.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("Base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(API_PREFIX.split('/'))
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("Request failed with status {}: {}", status, error_text);
            return Err(ClientError::from_body(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.client.post(url).json(body).send().await?;

        self.handle_response(response).await
    }
}
