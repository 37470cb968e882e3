//! API Module
//!
//! HTTP API layer for the Atmos service.
//! Each submodule handles endpoints for a specific domain.

pub mod component;
pub mod error;
pub mod health;
pub mod platform;
pub mod schema;
pub mod service;
pub mod stack;
pub mod workflow;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::executor::{AtmosCli, CommandRunner};
use crate::parser::PositionalNaming;
use crate::service::{CatalogService, SettingsService, ValidationService, WorkflowService};

/// Fixed mount point of every endpoint
pub const API_PREFIX: &str = "/api/atmos";

/// Services shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub validation: Arc<ValidationService>,
    pub workflows: Arc<WorkflowService>,
    pub settings: Arc<SettingsService>,
}

impl AppState {
    /// Wires every service to one command runner
    pub fn new(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        let cli = AtmosCli::new(runner, &config);
        let workflow_timeout = config.workflow_timeout;
        let settings = Arc::new(SettingsService::new(config));

        Self {
            catalog: Arc::new(CatalogService::new(
                cli.clone(),
                Arc::new(PositionalNaming),
                settings.clone(),
            )),
            validation: Arc::new(ValidationService::new(cli.clone())),
            workflows: Arc::new(WorkflowService::new(cli, workflow_timeout)),
            settings,
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Stack endpoints
        .route("/stacks", get(stack::list_stacks))
        .route("/stacks/{name}", get(stack::get_stack))
        .route("/stacks/{name}/validate", post(stack::validate_stack))
        // Component endpoints
        .route("/components", get(component::list_components))
        .route("/components/{name}", get(component::get_component))
        .route(
            "/components/{name}/validate",
            post(component::validate_component),
        )
        // Workflow endpoints
        .route("/workflows", get(workflow::list_workflows))
        .route("/workflows/execute", post(workflow::execute_workflow))
        .route("/services/provision", post(service::provision_service))
        // Platform endpoints
        .route("/config", get(platform::get_config))
        .route("/metrics", get(platform::get_metrics));

    Router::new()
        .nest(API_PREFIX, api)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fake::{Scripted, ScriptedRunner};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const STACKS: &str = r#"{
        "acme-core-dev": {"components": {"terraform": {"vpc": {}, "eks": {}}}},
        "acme-core-prod": {}
    }"#;

    const COMPONENTS: &str = r#"[
        {"name": "vpc", "type": "terraform", "path": "components/terraform/vpc"},
        "nginx"
    ]"#;

    fn app(runner: ScriptedRunner) -> (Router, Arc<ScriptedRunner>) {
        app_with_config(runner, Config::default())
    }

    fn app_with_config(runner: ScriptedRunner, config: Config) -> (Router, Arc<ScriptedRunner>) {
        let runner = Arc::new(runner);
        let state = AppState::new(config, runner.clone());
        (create_router(state), runner)
    }

    fn atmos() -> ScriptedRunner {
        ScriptedRunner::new()
            .on("describe stacks", Scripted::stdout(STACKS))
            .on("list components", Scripted::stdout(COMPONENTS))
    }

    async fn send(app: &Router, method: Method, path: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(format!("{}{}", API_PREFIX, path))
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, runner) = app(ScriptedRunner::new());

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "atmos-plugin");
        assert!(body["timestamp"].is_string());
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_routes_live_under_prefix() {
        let (app, _) = app(atmos());

        let request = Request::builder()
            .uri("/stacks")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_stacks() {
        let (app, _) = app(atmos());

        let (status, body) = send(&app, Method::GET, "/stacks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["name"], "acme-core-dev");
        assert_eq!(body[0]["environment"], "dev");
        assert_eq!(body[0]["components"], json!(["eks", "vpc"]));
    }

    #[tokio::test]
    async fn test_get_stack() {
        let (app, _) = app(atmos());

        let (status, body) = send(&app, Method::GET, "/stacks/acme-core-prod", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tenant"], "acme");
    }

    #[tokio::test]
    async fn test_unknown_stack_is_404_every_time() {
        let (app, runner) = app(atmos());

        for _ in 0..2 {
            let (status, body) = send(&app, Method::GET, "/stacks/nope", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Stack not found");
            assert_eq!(body["stack"], "nope");
        }
        assert_eq!(runner.commands().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_component_is_404() {
        let (app, _) = app(atmos());

        let (status, body) = send(&app, Method::GET, "/components/rds", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Component not found");
        assert_eq!(body["component"], "rds");
    }

    #[tokio::test]
    async fn test_get_component_bare_name() {
        let (app, _) = app(atmos());

        let (status, body) = send(&app, Method::GET, "/components/nginx", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "terraform");
    }

    #[tokio::test]
    async fn test_unknown_component_type_does_not_break_listing() {
        let (app, _) = app(ScriptedRunner::new().on(
            "list components",
            Scripted::stdout(r#"[{"name":"vpc","type":"terraform"},{"name":"ami","type":"packer"}]"#),
        ));

        let (status, body) = send(&app, Method::GET, "/components/vpc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "terraform");

        let (status, body) = send(&app, Method::GET, "/components/ami", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "packer");
    }

    #[tokio::test]
    async fn test_bad_component_entry_is_named_in_500() {
        let (app, _) = app(ScriptedRunner::new().on(
            "list components",
            Scripted::stdout(r#"[{"name":"vpc"},{"name":"eks","outputs":[1]}]"#),
        ));

        let (status, body) = send(&app, Method::GET, "/components", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid component listing entry 'eks'"));
    }

    #[tokio::test]
    async fn test_listing_failure_is_500_with_message() {
        let (app, _) = app(ScriptedRunner::new().otherwise(Scripted::exit(1, "atmos.yaml not found")));

        let (status, body) = send(&app, Method::GET, "/stacks", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get stacks");
        assert_eq!(
            body["message"],
            "`atmos describe stacks --format=json` exited with status 1: atmos.yaml not found"
        );
    }

    #[tokio::test]
    async fn test_validate_stack() {
        let (app, runner) = app(ScriptedRunner::new().on(
            "validate stacks",
            Scripted::output("", "WARNING: deprecated key\n"),
        ));

        let (status, body) =
            send(&app, Method::POST, "/stacks/acme-core-dev/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["warnings"], json!(["WARNING: deprecated key"]));
        assert_eq!(runner.commands(), vec!["validate stacks -s acme-core-dev"]);
    }

    #[tokio::test]
    async fn test_invalid_stack_is_still_200() {
        let (app, _) = app(ScriptedRunner::new().otherwise(Scripted::exit(1, "schema error")));

        let (status, body) =
            send(&app, Method::POST, "/stacks/acme-core-dev/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn test_stack_name_with_whitespace_is_rejected() {
        let (app, runner) = app(ScriptedRunner::new());

        let (status, body) =
            send(&app, Method::POST, "/stacks/acme%20core/validate", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "name");
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_validate_component_with_and_without_stack() {
        let (app, runner) = app(ScriptedRunner::new());

        let (status, body) = send(&app, Method::POST, "/components/vpc/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["component"], "vpc");

        let (status, body) = send(
            &app,
            Method::POST,
            "/components/vpc/validate",
            Some(r#"{"stack": "acme-core-dev"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stack"], "acme-core-dev");

        assert_eq!(
            runner.commands(),
            vec![
                "terraform validate vpc",
                "terraform validate vpc -s acme-core-dev"
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_workflow() {
        let (app, runner) = app(ScriptedRunner::new().on(
            "workflow plan-all",
            Scripted::stdout("Plan: 3 to add, 0 to change, 0 to destroy.\n"),
        ));

        let (status, body) = send(
            &app,
            Method::POST,
            "/workflows/execute",
            Some(r#"{"workflow": "plan-all", "stack": "acme-core-dev", "dryRun": true}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workflow"], "plan-all");
        assert_eq!(body["status"], "success");
        assert_eq!(body["output"], "Plan: 3 to add, 0 to change, 0 to destroy.\n");
        assert!(body.get("error").is_none());
        assert!(body["executionTime"].as_u64().is_some());
        assert_eq!(runner.commands(), vec!["workflow plan-all --dry-run"]);
    }

    #[tokio::test]
    async fn test_failed_workflow_is_200_with_error() {
        let (app, _) = app(ScriptedRunner::new().otherwise(Scripted::exit(2, "step 1 failed")));

        let (status, body) = send(
            &app,
            Method::POST,
            "/workflows/execute",
            Some(r#"{"workflow": "apply-all"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("step 1 failed"));
    }

    #[tokio::test]
    async fn test_execute_workflow_rejects_bad_body() {
        let (app, runner) = app(ScriptedRunner::new());

        let (status, body) = send(
            &app,
            Method::POST,
            "/workflows/execute",
            Some(r#"{"workflow": "plan all", "timeout": "soon"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid workflow request");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);

        let (status, body) =
            send(&app, Method::POST, "/workflows/execute", Some("{oops")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "body");

        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_provision_service() {
        let (app, runner) = app(ScriptedRunner::new().on("workflow onboard-environment", Scripted::stdout("done")));

        let (status, body) = send(
            &app,
            Method::POST,
            "/services/provision",
            Some(
                r#"{
                    "serviceName": "payments",
                    "template": "web-service",
                    "tenant": "acme",
                    "account": "core",
                    "environment": "dev",
                    "parameters": {"replicas": 2}
                }"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["serviceName"], "payments");
        assert_eq!(body["status"], "provisioning");
        assert_eq!(body["stack"], "acme-core-dev");
        assert_eq!(body["workflowResult"]["status"], "success");
        assert_eq!(
            runner.commands(),
            vec![
                "workflow onboard-environment account=core environment=dev region=us-west-2 replicas=2 tenant=acme"
            ]
        );
    }

    #[tokio::test]
    async fn test_provision_requires_fields() {
        let (app, _) = app(ScriptedRunner::new());

        let (status, body) = send(
            &app,
            Method::POST,
            "/services/provision",
            Some(r#"{"serviceName": "payments"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid service request");
        assert_eq!(body["details"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_get_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atmos.yaml");
        std::fs::write(
            &path,
            "components:\n  terraform:\n    base_path: components/terraform\n    command: /usr/bin/tofu\nstacks:\n  name_pattern: \"{tenant}-{environment}\"\nworkflows:\n  list:\n    format: table\nlogs:\n  level: Info\n",
        )
        .unwrap();
        let (app, _) = app_with_config(
            ScriptedRunner::new(),
            Config::new(path, dir.path().to_path_buf()),
        );

        let (status, body) = send(&app, Method::GET, "/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["components"]["terraform"]["base_path"], "components/terraform");
        assert_eq!(body["stacks"]["name_pattern"], "{tenant}-{environment}");
        assert_eq!(body["components"]["terraform"]["command"], "/usr/bin/tofu");
        assert_eq!(body["workflows"]["list"]["format"], "table");
        assert_eq!(body["logs"]["level"], "Info");
    }

    #[tokio::test]
    async fn test_missing_config_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with_config(
            ScriptedRunner::new(),
            Config::new(dir.path().join("absent.yaml"), dir.path().to_path_buf()),
        );

        let (status, body) = send(&app, Method::GET, "/config", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get configuration");
        assert!(body["message"].as_str().unwrap().contains("absent.yaml"));
    }

    #[tokio::test]
    async fn test_metrics() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("deploy.yaml"), "workflows:\n  deploy: {}\n").unwrap();
        let config = Config::new(dir.path().join("atmos.yaml"), dir.path().to_path_buf())
            .with_workflows_dir(dir.path());
        let (app, _) = app_with_config(atmos(), config);

        let (status, body) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stacks"]["total"], 2);
        assert_eq!(body["components"]["total"], 2);
        assert_eq!(body["workflows"]["total"], 1);
        assert_eq!(body["workflows"]["successful"], 0);
    }
}
