//! Scripted `CommandRunner` for tests

use async_trait::async_trait;
use std::sync::Mutex;

use super::{CommandOutput, CommandRunner, ExecOptions, ExecutionError};

/// Canned behaviour for a matching command
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Exit 0 with the given output
    Output(CommandOutput),
    /// Exit non-zero with the given stderr
    Exit { code: i32, stderr: String },
    /// Never finish; yields a timeout once `options.timeout` elapses
    Hang,
}

impl Scripted {
    pub fn stdout(stdout: &str) -> Self {
        Scripted::Output(CommandOutput::new(stdout, ""))
    }

    pub fn output(stdout: &str, stderr: &str) -> Self {
        Scripted::Output(CommandOutput::new(stdout, stderr))
    }

    pub fn exit(code: i32, stderr: &str) -> Self {
        Scripted::Exit {
            code,
            stderr: stderr.to_string(),
        }
    }
}

/// Answers commands by prefix and records every invocation
pub struct ScriptedRunner {
    rules: Vec<(String, Scripted)>,
    fallback: Scripted,
    calls: Mutex<Vec<(String, ExecOptions)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Scripted::stdout(""),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Responds to commands starting with `prefix`; first match wins
    pub fn on(mut self, prefix: &str, response: Scripted) -> Self {
        self.rules.push((prefix.to_string(), response));
        self
    }

    /// Response for commands no rule matches
    pub fn otherwise(mut self, response: Scripted) -> Self {
        self.fallback = response;
        self
    }

    /// Commands received so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub fn last_options(&self) -> Option<ExecOptions> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, options)| options.clone())
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &str,
        options: &ExecOptions,
    ) -> Result<CommandOutput, ExecutionError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), options.clone()));

        let response = self
            .rules
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, response)| response)
            .unwrap_or(&self.fallback);

        let command_line = format!("atmos {}", command);
        match response {
            Scripted::Output(output) => Ok(output.clone()),
            Scripted::Exit { code, stderr } => Err(ExecutionError::NonZeroExit {
                command: command_line,
                code: *code,
                stderr: stderr.clone(),
            }),
            Scripted::Hang => {
                tokio::time::sleep(options.timeout).await;
                Err(ExecutionError::Timeout {
                    command: command_line,
                    timeout: options.timeout,
                    stderr: String::new(),
                })
            }
        }
    }
}
