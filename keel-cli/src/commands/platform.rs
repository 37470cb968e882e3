//! Health, configuration and metrics command handlers

use anyhow::Result;
use colored::*;
use keel_client::KeelClient;

/// Check server health
pub async fn health(client: &KeelClient) -> Result<()> {
    let health = client.health().await?;

    println!(
        "{} {} is {}",
        "✓".green().bold(),
        health.service.bold(),
        health.status.green()
    );
    println!(
        "  {}",
        health.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );

    Ok(())
}

/// Show the parsed Atmos configuration
pub async fn show_config(client: &KeelClient) -> Result<()> {
    let config = client.get_config().await?;

    println!("{}", "Atmos Configuration:".bold());
    println!("  Version: {}", config.version.cyan());

    if let Some(path) = config.component_base_path("terraform") {
        println!("  Terraform components: {}", path);
    }
    if let Some(path) = config.component_base_path("helmfile") {
        println!("  Helmfile components:  {}", path);
    }
    if let Some(path) = config.stacks_base_path() {
        println!("  Stacks:               {}", path);
    }
    if let Some(pattern) = config.stack_name_pattern() {
        println!("  Stack name pattern:   {}", pattern);
    }
    if let Some(path) = config.workflows_base_path() {
        println!("  Workflows:            {}", path);
    }

    println!("\n{}", "Full configuration:".bold());
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Show platform metrics
pub async fn show_metrics(client: &KeelClient) -> Result<()> {
    let metrics = client.get_metrics().await?;

    println!("{}", "Platform Metrics:".bold());
    println!(
        "  Stacks:     {} total, {} healthy, {} unhealthy",
        metrics.stacks.total,
        metrics.stacks.healthy.to_string().green(),
        metrics.stacks.unhealthy.to_string().red()
    );
    println!(
        "  Components: {} total, {} deployed, {} failed",
        metrics.components.total,
        metrics.components.deployed.to_string().green(),
        metrics.components.failed.to_string().red()
    );
    println!(
        "  Workflows:  {} defined, {} succeeded, {} failed",
        metrics.workflows.total,
        metrics.workflows.successful.to_string().green(),
        metrics.workflows.failed.to_string().red()
    );

    match metrics.workflows.last_run {
        Some(last_run) => println!(
            "  Last run:   {}",
            last_run.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        ),
        None => println!("  Last run:   {}", "never".dimmed()),
    }

    Ok(())
}
