//! Workflow command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use keel_client::KeelClient;
use keel_core::domain::workflow::{ExecutionStatus, WorkflowExecutionResult};
use keel_core::dto::workflow::WorkflowExecutionRequest;

use super::parse_key_val;

/// Workflow subcommands
#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// List workflow definitions
    List,
    /// Run a workflow
    Run {
        /// Workflow name
        name: String,

        /// Target stack (informational)
        #[arg(short, long)]
        stack: Option<String>,

        /// Workflow parameters (key=value)
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,

        /// Show what would run without applying changes
        #[arg(long)]
        dry_run: bool,

        /// Timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Handle workflow commands
pub async fn handle_workflow_command(command: WorkflowCommands, client: &KeelClient) -> Result<()> {
    match command {
        WorkflowCommands::List => list_workflows(client).await,
        WorkflowCommands::Run {
            name,
            stack,
            param,
            dry_run,
            timeout,
        } => {
            let req = WorkflowExecutionRequest {
                workflow: name,
                stack,
                parameters: (!param.is_empty()).then(|| param.into_iter().collect()),
                dry_run,
                timeout,
            };
            run_workflow(client, &req).await
        }
    }
}

async fn list_workflows(client: &KeelClient) -> Result<()> {
    let workflows = client.list_workflows().await?;

    if workflows.is_empty() {
        println!("{}", "No workflows found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} workflow(s):", workflows.len()).bold());
    println!();
    for workflow in workflows {
        println!(
            "  {} {} {}",
            "▸".cyan(),
            workflow.name.bold(),
            format!("({})", workflow.file).dimmed()
        );
        if !workflow.description.is_empty() {
            println!("    {}", workflow.description);
        }
        println!("    Steps: {}", workflow.steps.len());
    }

    Ok(())
}

async fn run_workflow(client: &KeelClient, req: &WorkflowExecutionRequest) -> Result<()> {
    if req.dry_run {
        println!("{}", format!("Dry run of workflow {}...", req.workflow).dimmed());
    } else {
        println!("{}", format!("Running workflow {}...", req.workflow).dimmed());
    }

    let result = client.execute_workflow(req).await?;
    print_result(&result);

    if !result.is_success() {
        anyhow::bail!("workflow {} failed", result.workflow);
    }
    Ok(())
}

/// Print a workflow execution result
pub(crate) fn print_result(result: &WorkflowExecutionResult) {
    let status = result.status.to_string();
    let status = match result.status {
        ExecutionStatus::Success => status.green(),
        ExecutionStatus::Error => status.red(),
        ExecutionStatus::Pending => status.yellow(),
    };

    println!("{}", "Workflow Result:".bold());
    println!("  Workflow: {}", result.workflow.cyan());
    println!("  Status:   {}", status);
    println!("  Duration: {}ms", result.execution_time);
    println!(
        "  Finished: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );

    if !result.output.is_empty() {
        println!("\n{}", "Output:".bold());
        println!("{}", result.output.trim_end());
    }

    if let Some(error) = &result.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}
