//! Service configuration
//!
//! Defines where the Atmos CLI lives, which configuration file and working
//! directory it runs against, and how long invocations may take.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of `atmos.yaml`
pub const DEFAULT_ATMOS_CONFIG_PATH: &str = "/app/atmos/atmos.yaml";

/// Default working directory for every Atmos invocation
pub const DEFAULT_WORKING_DIRECTORY: &str = "/app";

/// Workflow definitions directory used when neither the environment nor
/// `atmos.yaml` names one, relative to the working directory
pub const DEFAULT_WORKFLOWS_DIR: &str = "infrastructure/workflows";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Atmos binary name or path
    pub atmos_bin: String,

    /// Path exported to Atmos as `ATMOS_CLI_CONFIG_PATH`
    pub atmos_config_path: PathBuf,

    /// Directory every Atmos invocation runs in
    pub working_directory: PathBuf,

    /// Explicit workflow definitions directory
    pub workflows_dir: Option<PathBuf>,

    /// Timeout for listing and validation commands
    pub query_timeout: Duration,

    /// Timeout for workflow execution when the request gives none
    pub workflow_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(atmos_config_path: PathBuf, working_directory: PathBuf) -> Self {
        Self {
            bind_addr: "0.0.0.0:7007".to_string(),
            atmos_bin: "atmos".to_string(),
            atmos_config_path,
            working_directory,
            workflows_dir: None,
            query_timeout: Duration::from_secs(30),
            workflow_timeout: Duration::from_secs(30 * 60),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - KEEL_ATMOS_CONFIG_PATH (default: /app/atmos/atmos.yaml)
    /// - KEEL_WORKING_DIRECTORY (default: /app)
    /// - KEEL_ATMOS_BIN (default: atmos)
    /// - KEEL_BIND_ADDR (default: 0.0.0.0:7007)
    /// - KEEL_WORKFLOWS_DIR (optional)
    /// - KEEL_QUERY_TIMEOUT (seconds, default: 30)
    /// - KEEL_WORKFLOW_TIMEOUT (seconds, default: 1800)
    pub fn from_env() -> Self {
        let atmos_config_path = std::env::var("KEEL_ATMOS_CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_ATMOS_CONFIG_PATH.to_string());

        let working_directory = std::env::var("KEEL_WORKING_DIRECTORY")
            .unwrap_or_else(|_| DEFAULT_WORKING_DIRECTORY.to_string());

        let mut config = Self::new(atmos_config_path.into(), working_directory.into());

        if let Ok(bin) = std::env::var("KEEL_ATMOS_BIN") {
            config.atmos_bin = bin;
        }

        if let Ok(addr) = std::env::var("KEEL_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(dir) = std::env::var("KEEL_WORKFLOWS_DIR") {
            config = config.with_workflows_dir(dir);
        }

        if let Some(timeout) = seconds_from_env("KEEL_QUERY_TIMEOUT") {
            config.query_timeout = timeout;
        }

        if let Some(timeout) = seconds_from_env("KEEL_WORKFLOW_TIMEOUT") {
            config.workflow_timeout = timeout;
        }

        config
    }

    /// Sets an explicit workflow definitions directory
    pub fn with_workflows_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workflows_dir = Some(dir.into());
        self
    }

    /// Resolves a possibly relative path against the working directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_directory.join(path)
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.atmos_bin.trim().is_empty() {
            anyhow::bail!("atmos_bin cannot be empty");
        }

        if self.atmos_config_path.as_os_str().is_empty() {
            anyhow::bail!("atmos_config_path cannot be empty");
        }

        if self.working_directory.as_os_str().is_empty() {
            anyhow::bail!("working_directory cannot be empty");
        }

        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.query_timeout.is_zero() {
            anyhow::bail!("query_timeout must be greater than 0");
        }

        if self.workflow_timeout.is_zero() {
            anyhow::bail!("workflow_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_ATMOS_CONFIG_PATH.into(),
            DEFAULT_WORKING_DIRECTORY.into(),
        )
    }
}

fn seconds_from_env(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}
