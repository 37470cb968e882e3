//! Child-process implementation of `CommandRunner`

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{CommandOutput, CommandRunner, ExecOptions, ExecutionError};

/// Spawns the Atmos binary for each invocation
///
/// The subcommand is split on whitespace and passed as argv; no shell is
/// involved. A child that outlives its timeout is killed and whatever it
/// wrote to stderr is returned with the error; an abandoned request drops
/// the child, which kills it too.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    /// Creates a runner for the given binary name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full command line as it will be executed
    pub fn command_line(&self, command: &str) -> String {
        let args = command.split_whitespace().collect::<Vec<_>>().join(" ");
        if args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, args)
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &str,
        options: &ExecOptions,
    ) -> Result<CommandOutput, ExecutionError> {
        let execution_id = Uuid::new_v4();
        let command_line = self.command_line(command);

        info!(
            %execution_id,
            command = %command_line,
            cwd = %options.cwd.display(),
            timeout_ms = options.timeout.as_millis() as u64,
            "Executing atmos command"
        );

        let started = Instant::now();
        let result = spawn_and_wait(&self.program, command, &command_line, options).await;

        match &result {
            Ok(output) => debug!(
                %execution_id,
                command = %command_line,
                elapsed_ms = started.elapsed().as_millis() as u64,
                stdout_len = output.stdout.len(),
                stderr_len = output.stderr.len(),
                "Atmos command completed"
            ),
            Err(e) => error!(
                %execution_id,
                command = %command_line,
                kind = e.kind(),
                stderr = e.stderr().map(str::trim).unwrap_or_default(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Atmos command failed: {}",
                e
            ),
        }

        result
    }
}

async fn spawn_and_wait(
    program: &str,
    command: &str,
    command_line: &str,
    options: &ExecOptions,
) -> Result<CommandOutput, ExecutionError> {
    let mut child = Command::new(program)
        .args(command.split_whitespace())
        .current_dir(&options.cwd)
        .envs(&options.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecutionError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    // Buffers outlive the wait so a timed-out run still reports its output
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let finished = tokio::time::timeout(options.timeout, async {
        let (status, out, err) = tokio::join!(
            child.wait(),
            drain(stdout_pipe, &mut stdout),
            drain(stderr_pipe, &mut stderr)
        );
        out.and(err).and(status)
    })
    .await;

    let status = match finished {
        Ok(Ok(status)) => status,
        Ok(Err(source)) => {
            return Err(ExecutionError::Spawn {
                command: command_line.to_string(),
                source,
            });
        }
        Err(_) => {
            if let Err(e) = child.kill().await {
                warn!(command = %command_line, "Failed to kill timed-out process: {}", e);
            }
            return Err(ExecutionError::Timeout {
                command: command_line.to_string(),
                timeout: options.timeout,
                stderr: String::from_utf8_lossy(&stderr).to_string(),
            });
        }
    };

    let stdout = String::from_utf8_lossy(&stdout).to_string();
    let stderr = String::from_utf8_lossy(&stderr).to_string();

    if !status.success() {
        return Err(ExecutionError::NonZeroExit {
            command: command_line.to_string(),
            code: status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(CommandOutput::new(stdout, stderr))
}

/// Appends everything read from `pipe` to `buf`, chunk by chunk, so partial
/// output survives cancellation
async fn drain<R>(pipe: Option<R>, buf: &mut Vec<u8>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return Ok(());
    };
    let mut chunk = [0u8; 8192];
    loop {
        let read = pipe.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..read]);
    }
}
