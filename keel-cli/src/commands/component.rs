//! Component command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use keel_client::KeelClient;

use super::{print_map, print_validation};

/// Component subcommands
#[derive(Subcommand)]
pub enum ComponentCommands {
    /// List all components
    List,
    /// Get component details
    Get {
        /// Component name
        name: String,
    },
    /// Validate a component
    Validate {
        /// Component name
        name: String,

        /// Validate within this stack
        #[arg(short, long)]
        stack: Option<String>,
    },
}

/// Handle component commands
pub async fn handle_component_command(
    command: ComponentCommands,
    client: &KeelClient,
) -> Result<()> {
    match command {
        ComponentCommands::List => list_components(client).await,
        ComponentCommands::Get { name } => get_component(client, &name).await,
        ComponentCommands::Validate { name, stack } => {
            validate_component(client, &name, stack.as_deref()).await
        }
    }
}

async fn list_components(client: &KeelClient) -> Result<()> {
    let components = client.list_components().await?;

    if components.is_empty() {
        println!("{}", "No components found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} component(s):", components.len()).bold()
    );
    println!();
    for component in components {
        println!(
            "  {} {} {}",
            "▸".cyan(),
            component.name.bold(),
            format!("({})", component.component_type).dimmed()
        );
        if !component.description.is_empty() {
            println!("    {}", component.description);
        }
    }

    Ok(())
}

async fn get_component(client: &KeelClient, name: &str) -> Result<()> {
    let component = client.get_component(name).await?;

    println!("{}", "Component Details:".bold());
    println!("  Name:        {}", component.name.cyan());
    println!("  Type:        {}", component.component_type);
    if !component.path.is_empty() {
        println!("  Path:        {}", component.path);
    }
    if !component.description.is_empty() {
        println!("  Description: {}", component.description);
    }

    print_map("Variables", &component.variables);
    print_map("Outputs", &component.outputs);
    print_map("Metadata", &component.metadata);

    Ok(())
}

async fn validate_component(client: &KeelClient, name: &str, stack: Option<&str>) -> Result<()> {
    let result = client.validate_component(name, stack).await?;

    let subject = match &result.stack {
        Some(stack) => format!("Component {} in {}", result.component, stack),
        None => format!("Component {}", result.component),
    };
    print_validation(&subject, result.valid, &result.errors, &result.warnings);

    Ok(())
}
