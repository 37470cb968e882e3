//! Workflow and provisioning endpoints

use crate::KeelClient;
use crate::error::Result;
use keel_core::domain::workflow::{Workflow, WorkflowExecutionResult};
use keel_core::dto::service::{ProvisionResponse, ServiceRequest};
use keel_core::dto::workflow::WorkflowExecutionRequest;

impl KeelClient {
    /// List workflow definitions
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        self.get(&["workflows"]).await
    }

    /// Run a workflow and wait for it to finish
    ///
    /// A failed run is still `Ok`; inspect the result's status.
    pub async fn execute_workflow(
        &self,
        req: &WorkflowExecutionRequest,
    ) -> Result<WorkflowExecutionResult> {
        tracing::debug!("Executing workflow {}", req.workflow);
        self.post(&["workflows", "execute"], req).await
    }

    /// Provision a service environment
    pub async fn provision_service(&self, req: &ServiceRequest) -> Result<ProvisionResponse> {
        tracing::debug!("Provisioning service {}", req.service_name);
        self.post(&["services", "provision"], req).await
    }
}
