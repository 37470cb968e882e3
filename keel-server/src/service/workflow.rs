//! Workflow Service
//!
//! Turns a `WorkflowExecutionRequest` into an `atmos workflow` invocation and
//! reports the outcome. Execution never fails from the caller's point of
//! view: every failure ends up in the result's `error` field.

use chrono::{DateTime, Utc};
use keel_core::domain::workflow::{ExecutionStatus, WorkflowExecutionResult};
use keel_core::dto::workflow::WorkflowExecutionRequest;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::executor::AtmosCli;

pub struct WorkflowService {
    cli: AtmosCli,
    default_timeout: Duration,
    stats: ExecutionStats,
}

impl WorkflowService {
    /// Creates a workflow service; `default_timeout` applies when a request
    /// carries no override
    pub fn new(cli: AtmosCli, default_timeout: Duration) -> Self {
        Self {
            cli,
            default_timeout,
            stats: ExecutionStats::default(),
        }
    }

    /// Run a workflow
    pub async fn execute(&self, request: &WorkflowExecutionRequest) -> WorkflowExecutionResult {
        info!(
            "Executing Atmos workflow: {} (stack: {}, dry_run: {})",
            request.workflow,
            request.stack.as_deref().unwrap_or("-"),
            request.dry_run
        );

        let command = build_command(request);
        let timeout = request
            .timeout
            .map(Duration::from_millis)
            .unwrap_or(self.default_timeout);

        let started = Instant::now();
        let outcome = self.cli.run_with_timeout(&command, timeout).await;
        let execution_time = started.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(output) => {
                info!(
                    "Workflow {} completed in {}ms",
                    request.workflow, execution_time
                );
                WorkflowExecutionResult {
                    workflow: request.workflow.clone(),
                    status: ExecutionStatus::Success,
                    output: output.stdout,
                    error: Some(output.stderr).filter(|stderr| !stderr.is_empty()),
                    execution_time,
                    timestamp: Utc::now(),
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    error!(
                        "Workflow {} timed out after {}ms",
                        request.workflow, execution_time
                    );
                } else {
                    error!(
                        "Workflow {} failed after {}ms: {}",
                        request.workflow, execution_time, e
                    );
                }
                WorkflowExecutionResult {
                    workflow: request.workflow.clone(),
                    status: ExecutionStatus::Error,
                    output: String::new(),
                    error: Some(e.to_string()),
                    execution_time,
                    timestamp: Utc::now(),
                }
            }
        };

        self.stats.record(&result);
        result
    }

    /// Executions handled since start
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// `workflow <name> [key=value ...] [--dry-run]`
///
/// Parameters are emitted in key order. Values are not quoted; callers must
/// keep whitespace out of them.
pub fn build_command(request: &WorkflowExecutionRequest) -> String {
    let mut command = format!("workflow {}", request.workflow);

    if let Some(parameters) = &request.parameters {
        for (key, value) in parameters {
            command.push_str(&format!(" {}={}", key, value));
        }
    }

    if request.dry_run {
        command.push_str(" --dry-run");
    }

    command
}

/// Success/failure counters for executed workflows
#[derive(Debug, Default)]
struct ExecutionStats {
    successful: AtomicU64,
    failed: AtomicU64,
    /// Milliseconds since the epoch of the latest run, 0 when none
    last_run_ms: AtomicI64,
}

impl ExecutionStats {
    fn record(&self, result: &WorkflowExecutionResult) {
        if result.is_success() {
            self.successful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.last_run_ms
            .fetch_max(result.timestamp.timestamp_millis(), Ordering::Relaxed);
    }

    fn snapshot(&self) -> StatsSnapshot {
        let last_run_ms = self.last_run_ms.load(Ordering::Relaxed);
        StatsSnapshot {
            successful: self.successful.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            last_run: (last_run_ms > 0)
                .then(|| DateTime::<Utc>::from_timestamp_millis(last_run_ms))
                .flatten(),
        }
    }
}

/// Point-in-time copy of the execution counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub successful: u64,
    pub failed: u64,
    pub last_run: Option<DateTime<Utc>>,
}
