//! Keel CLI
//!
//! Command-line interface for the Keel Atmos service.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Keel infrastructure CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "KEEL_SERVER_URL", default_value = "http://localhost:7007")]
    server_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "KEEL_REQUEST_TIMEOUT", default_value_t = 1860)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        timeout_secs: cli.timeout_secs,
    };

    handle_command(cli.command, &config).await
}
