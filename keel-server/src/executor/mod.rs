//! Command executor
//!
//! Runs Atmos subcommands as child processes with a bounded lifetime.
//!
//! - `CommandRunner`: the process-runner capability (trait, swappable in tests)
//! - `ProcessRunner`: tokio implementation that spawns the real binary
//! - `AtmosCli`: a runner bound to the configured working directory,
//!   `ATMOS_CLI_CONFIG_PATH` and default timeout

mod process;

#[cfg(test)]
pub mod fake;

pub use process::ProcessRunner;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// Environment variable Atmos reads its configuration path from
pub const ATMOS_CONFIG_ENV: &str = "ATMOS_CLI_CONFIG_PATH";

/// Per-invocation options
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOptions {
    pub timeout: Duration,
    pub cwd: PathBuf,
    /// Extra variables layered over the service's own environment
    pub env: HashMap<String, String>,
}

/// Captured output of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Why an invocation did not complete successfully
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The process could not be started or waited on
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process outlived its timeout and was killed; `stderr` holds what
    /// it wrote before the kill
    #[error("`{command}` timed out after {}ms{}", .timeout.as_millis(), stderr_suffix(.stderr))]
    Timeout {
        command: String,
        timeout: Duration,
        stderr: String,
    },

    /// The process exited with a non-zero status (-1 when killed by a signal)
    #[error("`{command}` exited with status {code}: {}", .stderr.trim())]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

impl ExecutionError {
    /// Categorical tag of this failure
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionError::Spawn { .. } => "spawn",
            ExecutionError::Timeout { .. } => "timeout",
            ExecutionError::NonZeroExit { .. } => "nonZeroExit",
        }
    }

    /// Captured stderr, when the process got far enough to produce any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecutionError::Timeout { stderr, .. } | ExecutionError::NonZeroExit { stderr, .. } => {
                Some(stderr)
            }
            ExecutionError::Spawn { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionError::Timeout { .. })
    }
}

fn stderr_suffix(stderr: &str) -> String {
    match stderr.trim() {
        "" => String::new(),
        trimmed => format!(": {}", trimmed),
    }
}

/// Capability to run an Atmos subcommand
///
/// Implementations prefix `command` with the Atmos binary, run it in
/// `options.cwd` with `options.env` applied, and enforce `options.timeout`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: &str,
        options: &ExecOptions,
    ) -> Result<CommandOutput, ExecutionError>;
}

/// A command runner bound to the service configuration
#[derive(Clone)]
pub struct AtmosCli {
    runner: Arc<dyn CommandRunner>,
    working_directory: PathBuf,
    env: HashMap<String, String>,
    default_timeout: Duration,
}

impl AtmosCli {
    /// Binds a runner to the configured working directory and config path
    pub fn new(runner: Arc<dyn CommandRunner>, config: &Config) -> Self {
        let mut env = HashMap::new();
        env.insert(
            ATMOS_CONFIG_ENV.to_string(),
            config.atmos_config_path.display().to_string(),
        );

        Self {
            runner,
            working_directory: config.working_directory.clone(),
            env,
            default_timeout: config.query_timeout,
        }
    }

    /// Runs a query-style command with the default timeout
    pub async fn run(&self, command: &str) -> Result<CommandOutput, ExecutionError> {
        self.run_with_timeout(command, self.default_timeout).await
    }

    /// Runs a command with an explicit timeout
    pub async fn run_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandOutput, ExecutionError> {
        self.runner.run(command, &self.options(timeout)).await
    }

    /// Options every invocation through this handle uses
    pub fn options(&self, timeout: Duration) -> ExecOptions {
        ExecOptions {
            timeout,
            cwd: self.working_directory.clone(),
            env: self.env.clone(),
        }
    }
}
