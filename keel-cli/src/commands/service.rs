//! Service provisioning command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use keel_client::KeelClient;
use keel_core::dto::service::{ProvisionStatus, ServiceRequest};
use serde_json::{Map, Value};

use super::parse_key_val;
use super::workflow::print_result;

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Provision a service environment
    Provision {
        /// Service name
        #[arg(long)]
        name: String,

        /// Service template
        #[arg(long)]
        template: String,

        #[arg(long)]
        tenant: String,

        #[arg(long)]
        account: String,

        #[arg(long)]
        environment: String,

        /// Region (server default: us-west-2)
        #[arg(long)]
        region: Option<String>,

        /// Extra workflow parameters (key=value)
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,
    },
}

/// Handle service commands
pub async fn handle_service_command(command: ServiceCommands, client: &KeelClient) -> Result<()> {
    match command {
        ServiceCommands::Provision {
            name,
            template,
            tenant,
            account,
            environment,
            region,
            param,
        } => {
            let req = ServiceRequest {
                service_name: name,
                template,
                tenant,
                account,
                environment,
                region,
                parameters: to_parameters(param),
                metadata: None,
            };
            provision(client, &req).await
        }
    }
}

fn to_parameters(params: Vec<(String, String)>) -> Map<String, Value> {
    params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

async fn provision(client: &KeelClient, req: &ServiceRequest) -> Result<()> {
    println!(
        "{}",
        format!("Provisioning {} into {}...", req.service_name, req.stack_name()).dimmed()
    );

    let response = client.provision_service(req).await?;

    match response.status {
        ProvisionStatus::Provisioning => {
            println!("{}", "✓ Provisioning started".green().bold());
        }
        ProvisionStatus::Error => {
            println!("{}", "✗ Provisioning failed".red().bold());
        }
    }
    println!("  Service: {}", response.service_name.cyan());
    println!("  Stack:   {}", response.stack);
    println!();
    print_result(&response.workflow_result);

    if response.status == ProvisionStatus::Error {
        anyhow::bail!("provisioning of {} failed", response.service_name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_are_strings() {
        let params = to_parameters(vec![
            ("replicas".to_string(), "3".to_string()),
            ("tier".to_string(), "gold".to_string()),
        ]);

        assert_eq!(params["replicas"], Value::String("3".to_string()));
        assert_eq!(params["tier"], Value::String("gold".to_string()));
    }
}
