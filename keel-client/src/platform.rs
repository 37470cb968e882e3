//! Health, configuration and metrics endpoints

use crate::KeelClient;
use crate::error::Result;
use keel_core::domain::config::AtmosConfig;
use keel_core::domain::metrics::PlatformMetrics;
use keel_core::dto::health::HealthStatus;

impl KeelClient {
    /// Check that the server is up
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(&["health"]).await
    }

    /// Get the parsed Atmos configuration
    pub async fn get_config(&self) -> Result<AtmosConfig> {
        self.get(&["config"]).await
    }

    /// Get aggregate platform metrics
    pub async fn get_metrics(&self) -> Result<PlatformMetrics> {
        self.get(&["metrics"]).await
    }
}
