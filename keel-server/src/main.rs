//! Keel Server
//!
//! HTTP facade over the Atmos CLI.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Executor: Spawn `atmos` as a child process with timeouts and audit logs
//! - Parser: Turn CLI JSON and workflow YAML into domain types
//! - Services: Catalog reads, validation, workflow runs, provisioning
//! - API: axum router mounted under `/api/atmos`
//!
//! Every request re-queries Atmos; the server keeps no state beyond
//! workflow execution counters.

mod api;
mod config;
mod executor;
mod parser;
mod service;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{API_PREFIX, AppState};
use crate::config::Config;
use crate::executor::ProcessRunner;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keel_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Keel Server...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: atmos_bin={}, atmos_config_path={}, working_directory={}",
        config.atmos_bin,
        config.atmos_config_path.display(),
        config.working_directory.display()
    );

    let runner = Arc::new(ProcessRunner::new(config.atmos_bin.clone()));
    let addr = config.bind_addr.clone();

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(config, runner));

    info!("Listening on {} (API under {})", addr, API_PREFIX);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
