//! Stack command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use keel_client::KeelClient;
use keel_core::domain::stack::Stack;

use super::{print_map, print_validation};

/// Stack subcommands
#[derive(Subcommand)]
pub enum StackCommands {
    /// List all stacks
    List,
    /// Get stack details
    Get {
        /// Stack name
        name: String,
    },
    /// Validate a stack
    Validate {
        /// Stack name
        name: String,
    },
}

/// Handle stack commands
pub async fn handle_stack_command(command: StackCommands, client: &KeelClient) -> Result<()> {
    match command {
        StackCommands::List => list_stacks(client).await,
        StackCommands::Get { name } => get_stack(client, &name).await,
        StackCommands::Validate { name } => validate_stack(client, &name).await,
    }
}

async fn list_stacks(client: &KeelClient) -> Result<()> {
    let stacks = client.list_stacks().await?;

    if stacks.is_empty() {
        println!("{}", "No stacks found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} stack(s):", stacks.len()).bold());
    println!();
    for stack in stacks {
        println!("  {} {}", "▸".cyan(), stack.name.bold());
        println!("    {}", describe_coordinates(&stack).dimmed());
        println!("    Components: {}", stack.components.len());
    }

    Ok(())
}

async fn get_stack(client: &KeelClient, name: &str) -> Result<()> {
    let stack = client.get_stack(name).await?;

    println!("{}", "Stack Details:".bold());
    println!("  Name:        {}", stack.name.cyan());
    println!("  Tenant:      {}", stack.tenant);
    println!("  Account:     {}", stack.account);
    println!("  Environment: {}", stack.environment);
    println!("  Region:      {}", stack.region);

    if !stack.components.is_empty() {
        println!("\n{}", "Components:".bold());
        for component in &stack.components {
            println!("  {} {}", "▸".cyan(), component);
        }
    }

    print_map("Variables", &stack.variables);
    print_map("Metadata", &stack.metadata);

    Ok(())
}

async fn validate_stack(client: &KeelClient, name: &str) -> Result<()> {
    let result = client.validate_stack(name).await?;
    print_validation(
        &format!("Stack {}", result.stack),
        result.valid,
        &result.errors,
        &result.warnings,
    );
    Ok(())
}

fn describe_coordinates(stack: &Stack) -> String {
    let coordinates = stack.coordinates();
    if coordinates.is_empty() {
        return "unrecognised name layout".to_string();
    }

    [
        ("tenant", &coordinates.tenant),
        ("account", &coordinates.account),
        ("environment", &coordinates.environment),
        ("region", &coordinates.region),
    ]
    .iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(key, value)| format!("{}={}", key, value))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::domain::stack::StackCoordinates;

    #[test]
    fn test_describe_coordinates() {
        let stack = Stack::new(
            "acme-core-dev",
            StackCoordinates {
                tenant: "acme".to_string(),
                account: "core".to_string(),
                environment: "dev".to_string(),
                region: String::new(),
            },
        );
        assert_eq!(
            describe_coordinates(&stack),
            "tenant=acme account=core environment=dev"
        );
    }

    #[test]
    fn test_describe_unknown_layout() {
        let stack = Stack::new("standalone", StackCoordinates::default());
        assert_eq!(describe_coordinates(&stack), "unrecognised name layout");
    }

    #[test]
    fn test_describe_region_only() {
        let stack = Stack::new(
            "ue2",
            StackCoordinates {
                region: "ue2".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(describe_coordinates(&stack), "region=ue2");
    }
}
