//! Platform metrics
//!
//! Aggregate counts over the current Atmos state plus workflow execution
//! counters. Health and deployment status are not evaluated, so every stack
//! counts as healthy and every component as deployed.

use keel_core::domain::metrics::{
    ComponentMetrics, PlatformMetrics, StackMetrics, WorkflowMetrics,
};

use super::{CatalogService, Result, WorkflowService};

/// Collect metrics, querying stacks, components and workflows concurrently
pub async fn collect(catalog: &CatalogService, workflows: &WorkflowService) -> Result<PlatformMetrics> {
    let (stacks, components, definitions) = tokio::try_join!(
        catalog.list_stacks(),
        catalog.list_components(),
        catalog.list_workflows(),
    )?;

    let stats = workflows.stats();

    Ok(PlatformMetrics {
        stacks: StackMetrics {
            total: stacks.len(),
            healthy: stacks.len(),
            unhealthy: 0,
        },
        components: ComponentMetrics {
            total: components.len(),
            deployed: components.len(),
            failed: 0,
        },
        workflows: WorkflowMetrics {
            total: definitions.len(),
            successful: stats.successful,
            failed: stats.failed,
            last_run: stats.last_run,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::AtmosCli;
    use crate::executor::fake::{Scripted, ScriptedRunner};
    use crate::parser::PositionalNaming;
    use crate::service::{ServiceError, SettingsService};
    use keel_core::dto::workflow::WorkflowExecutionRequest;
    use std::sync::Arc;
    use std::time::Duration;

    fn services(runner: ScriptedRunner, config: Config) -> (CatalogService, WorkflowService) {
        let cli = AtmosCli::new(Arc::new(runner), &config);
        let settings = Arc::new(SettingsService::new(config));
        (
            CatalogService::new(cli.clone(), Arc::new(PositionalNaming), settings),
            WorkflowService::new(cli, Duration::from_secs(60)),
        )
    }

    #[tokio::test]
    async fn test_collect_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("main.yaml"),
            "workflows:\n  plan-all: {}\n  apply-all: {}\n",
        )
        .unwrap();
        let config = Config::new(dir.path().join("atmos.yaml"), dir.path().to_path_buf())
            .with_workflows_dir(dir.path());

        let (catalog, workflows) = services(
            ScriptedRunner::new()
                .on("describe stacks", Scripted::stdout(r#"{"a-b-c": {}, "d-e-f": {}}"#))
                .on("list components", Scripted::stdout(r#"["vpc"]"#))
                .otherwise(Scripted::stdout("ok")),
            config,
        );

        workflows
            .execute(&WorkflowExecutionRequest::new("plan-all"))
            .await;

        let metrics = collect(&catalog, &workflows).await.unwrap();
        assert_eq!(metrics.stacks.total, 2);
        assert_eq!(metrics.stacks.healthy, 2);
        assert_eq!(metrics.components.total, 1);
        assert_eq!(metrics.workflows.total, 2);
        assert_eq!(metrics.workflows.successful, 1);
        assert!(metrics.workflows.last_run.is_some());
    }

    #[tokio::test]
    async fn test_collect_fails_when_any_listing_fails() {
        let (catalog, workflows) = services(
            ScriptedRunner::new().otherwise(Scripted::exit(1, "atmos unavailable")),
            Config::default(),
        );

        assert!(matches!(
            collect(&catalog, &workflows).await,
            Err(ServiceError::Execution(_)) | Err(ServiceError::Io { .. })
        ));
    }
}
