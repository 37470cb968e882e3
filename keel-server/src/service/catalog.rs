//! Catalog Service
//!
//! Read paths over Atmos state: stacks, components and workflow definitions.
//! Every call re-queries the CLI or the filesystem; nothing is cached.

use keel_core::domain::component::Component;
use keel_core::domain::stack::Stack;
use keel_core::domain::workflow::Workflow;
use std::sync::Arc;
use tracing::{debug, error};

use super::{Result, ServiceError, SettingsService};
use crate::executor::AtmosCli;
use crate::parser::{self, StackNaming, WorkflowFile};

pub struct CatalogService {
    cli: AtmosCli,
    naming: Arc<dyn StackNaming>,
    settings: Arc<SettingsService>,
}

impl CatalogService {
    pub fn new(cli: AtmosCli, naming: Arc<dyn StackNaming>, settings: Arc<SettingsService>) -> Self {
        Self {
            cli,
            naming,
            settings,
        }
    }

    /// List all stacks
    pub async fn list_stacks(&self) -> Result<Vec<Stack>> {
        debug!("Getting Atmos stacks");

        let stacks = self
            .query("describe stacks --format=json")
            .await
            .and_then(|stdout| {
                parser::parse_stacks(&stdout, self.naming.as_ref()).map_err(ServiceError::from)
            })
            .inspect_err(|e| error!("Failed to get Atmos stacks: {}", e))?;

        debug!("Found {} stacks", stacks.len());
        Ok(stacks)
    }

    /// Find a stack by exact name
    pub async fn find_stack(&self, name: &str) -> Result<Option<Stack>> {
        let stacks = self.list_stacks().await?;
        Ok(stacks.into_iter().find(|s| s.name == name))
    }

    /// List all components
    pub async fn list_components(&self) -> Result<Vec<Component>> {
        debug!("Getting Atmos components");

        let components = self
            .query("list components --format=json")
            .await
            .and_then(|stdout| parser::parse_components(&stdout).map_err(ServiceError::from))
            .inspect_err(|e| error!("Failed to get Atmos components: {}", e))?;

        debug!("Found {} components", components.len());
        Ok(components)
    }

    /// Find a component by exact name
    pub async fn find_component(&self, name: &str) -> Result<Option<Component>> {
        let components = self.list_components().await?;
        Ok(components.into_iter().find(|c| c.name == name))
    }

    /// List workflows from every `.yaml`/`.yml` file in the workflows directory
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        debug!("Getting Atmos workflows");

        let workflows = self
            .read_workflow_files()
            .await
            .and_then(|files| parser::parse_workflows(&files).map_err(ServiceError::from))
            .inspect_err(|e| error!("Failed to get Atmos workflows: {}", e))?;

        debug!("Found {} workflows", workflows.len());
        Ok(workflows)
    }

    async fn query(&self, command: &str) -> Result<String> {
        Ok(self.cli.run(command).await?.stdout)
    }

    async fn read_workflow_files(&self) -> Result<Vec<WorkflowFile>> {
        let dir = self.settings.workflows_dir().await;
        let io_error = |source: std::io::Error| ServiceError::Io {
            path: dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_error)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".yaml") || name.ends_with(".yml") {
                names.push(name);
            }
        }
        names.sort();

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            let path = dir.join(&name);
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ServiceError::Io { path, source })?;
            files.push(WorkflowFile::new(name, content));
        }

        Ok(files)
    }
}
