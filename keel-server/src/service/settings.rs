//! Settings Service
//!
//! Reads `atmos.yaml` and resolves where workflow definitions live.

use keel_core::domain::config::AtmosConfig;
use std::path::PathBuf;
use tracing::{debug, error, warn};

use super::{Result, ServiceError};
use crate::config::{Config, DEFAULT_WORKFLOWS_DIR};

pub struct SettingsService {
    config: Config,
}

impl SettingsService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads and parses the Atmos configuration file
    pub async fn load(&self) -> Result<AtmosConfig> {
        let path = &self.config.atmos_config_path;
        debug!("Reading Atmos configuration from {}", path.display());

        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            error!("Failed to read Atmos configuration {}: {}", path.display(), source);
            ServiceError::Io {
                path: path.clone(),
                source,
            }
        })?;

        if content.trim().is_empty() {
            return Ok(AtmosConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|source| {
            error!("Failed to parse Atmos configuration {}: {}", path.display(), source);
            ServiceError::Yaml {
                path: path.clone(),
                source,
            }
        })
    }

    /// Directory holding workflow definition files
    ///
    /// An explicit override wins, then `workflows.base_path` from
    /// `atmos.yaml`, then the built-in default. Relative paths are resolved
    /// against the working directory.
    pub async fn workflows_dir(&self) -> PathBuf {
        if let Some(dir) = &self.config.workflows_dir {
            return self.config.resolve(dir);
        }

        let base_path = match self.load().await {
            Ok(atmos) => atmos.workflows_base_path().map(str::to_string),
            Err(ServiceError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("No Atmos configuration, using default workflows directory");
                None
            }
            Err(e) => {
                warn!("Using default workflows directory: {}", e);
                None
            }
        };

        self.config
            .resolve(base_path.as_deref().unwrap_or(DEFAULT_WORKFLOWS_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> Config {
        Config::new(dir.join("atmos.yaml"), dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_load_parses_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("atmos.yaml"),
            "version: 1.2\ncomponents:\n  terraform:\n    base_path: components/terraform\n    apply_auto_approve: false\nstacks:\n  base_path: stacks\n  included_paths:\n    - orgs/**/*\n",
        )
        .unwrap();

        let settings = SettingsService::new(config_in(dir.path()));
        let atmos = settings.load().await.unwrap();

        assert_eq!(atmos.version, "1.2");
        assert_eq!(
            atmos.component_base_path("terraform"),
            Some("components/terraform")
        );
        assert_eq!(
            atmos.components["terraform"]["apply_auto_approve"],
            serde_json::Value::Bool(false)
        );
        assert_eq!(atmos.stacks["included_paths"], serde_json::json!(["orgs/**/*"]));
    }

    #[tokio::test]
    async fn test_load_keeps_unmodelled_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("atmos.yaml"),
            "components:\n  terraform:\n    command: /usr/bin/tofu\nworkflows:\n  list:\n    format: table\nlogs:\n  level: Info\n",
        )
        .unwrap();

        let atmos = SettingsService::new(config_in(dir.path()))
            .load()
            .await
            .unwrap();

        assert_eq!(atmos.components["terraform"]["command"], "/usr/bin/tofu");
        assert_eq!(atmos.workflows["list"]["format"], "table");
        assert_eq!(atmos.other["logs"]["level"], "Info");
    }

    #[tokio::test]
    async fn test_malformed_config_falls_back_to_default_workflows_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("atmos.yaml"), "workflows: [unclosed\n").unwrap();

        let settings = SettingsService::new(config_in(dir.path()));
        assert!(matches!(
            settings.load().await,
            Err(ServiceError::Yaml { .. })
        ));
        assert_eq!(
            settings.workflows_dir().await,
            dir.path().join("infrastructure/workflows")
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsService::new(config_in(dir.path()));
        assert!(matches!(
            settings.load().await,
            Err(ServiceError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_workflows_dir_resolution() {
        let dir = tempfile::tempdir().unwrap();

        // No atmos.yaml: built-in default
        let settings = SettingsService::new(config_in(dir.path()));
        assert_eq!(
            settings.workflows_dir().await,
            dir.path().join("infrastructure/workflows")
        );

        // atmos.yaml names a base path
        std::fs::write(
            dir.path().join("atmos.yaml"),
            "workflows:\n  base_path: stacks/workflows\n",
        )
        .unwrap();
        assert_eq!(
            settings.workflows_dir().await,
            dir.path().join("stacks/workflows")
        );

        // Explicit override wins
        let settings =
            SettingsService::new(config_in(dir.path()).with_workflows_dir("/opt/workflows"));
        assert_eq!(settings.workflows_dir().await, PathBuf::from("/opt/workflows"));
    }
}
