//! Configuration module
//!
//! Handles CLI configuration.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Keel server
    pub server_url: String,
    /// Request timeout; workflow runs block until the workflow finishes
    pub timeout_secs: u64,
}
