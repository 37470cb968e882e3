//! Service Module
//!
//! Business logic layer. Services drive the Atmos CLI through `AtmosCli`,
//! parse what it returns and hand domain types to the API layer.

pub mod catalog;
pub mod metrics;
pub mod provision;
pub mod settings;
pub mod validation;
pub mod workflow;

pub use catalog::CatalogService;
pub use settings::SettingsService;
pub use validation::ValidationService;
pub use workflow::WorkflowService;

use std::path::PathBuf;
use thiserror::Error;

use crate::executor::ExecutionError;
use crate::parser::ParseError;

/// Failure of a read path (listing, lookup, configuration)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
