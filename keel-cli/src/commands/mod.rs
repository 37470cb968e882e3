//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod component;
mod platform;
mod service;
mod stack;
mod workflow;

pub use component::ComponentCommands;
pub use service::ServiceCommands;
pub use stack::StackCommands;
pub use workflow::WorkflowCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use keel_client::KeelClient;
use std::time::Duration;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the server is up
    Health,
    /// Stack inspection and validation
    Stack {
        #[command(subcommand)]
        command: StackCommands,
    },
    /// Component inspection and validation
    Component {
        #[command(subcommand)]
        command: ComponentCommands,
    },
    /// Workflow listing and execution
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
    /// Service provisioning
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Show the Atmos configuration
    Config,
    /// Show platform metrics
    Metrics,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match command {
        Commands::Health => platform::health(&client).await,
        Commands::Stack { command } => stack::handle_stack_command(command, &client).await,
        Commands::Component { command } => {
            component::handle_component_command(command, &client).await
        }
        Commands::Workflow { command } => {
            workflow::handle_workflow_command(command, &client).await
        }
        Commands::Service { command } => service::handle_service_command(command, &client).await,
        Commands::Config => platform::show_config(&client).await,
        Commands::Metrics => platform::show_metrics(&client).await,
    }
}

fn build_client(config: &Config) -> Result<KeelClient> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    Ok(KeelClient::with_client(&config.server_url, http))
}

/// Parse a single key=value pair
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Print a pass/fail validation outcome with its errors and warnings
pub(crate) fn print_validation(subject: &str, valid: bool, errors: &[String], warnings: &[String]) {
    if valid {
        println!("{}", format!("✓ {} is valid", subject).green().bold());
    } else {
        println!("{}", format!("✗ {} is invalid", subject).red().bold());
    }

    for error in errors {
        println!("  {} {}", "error:".red(), error);
    }
    for warning in warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

/// Print a JSON map as indented `key = value` lines
pub(crate) fn print_map(title: &str, map: &serde_json::Map<String, serde_json::Value>) {
    if map.is_empty() {
        return;
    }

    println!("\n{}", format!("{}:", title).bold());
    for (key, value) in map {
        match value {
            serde_json::Value::String(s) => println!("  {} = {}", key.cyan(), s),
            other => println!("  {} = {}", key.cyan(), other),
        }
    }
}
