//! Service health and system configuration endpoints

use super::ApiClient;
use super::error::ClientError;
use crate::types::{HealthStatus, SystemConfig, SystemConfigUpdate};

impl ApiClient {
    /// Probe service health. Root-level endpoint, no credentials attached.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let request = self.gateway.request(reqwest::Method::GET, "/health");
        self.gateway.execute_public(request).await
    }

    /// Fetch the platform configuration
    pub async fn get_config(&self) -> Result<SystemConfig, ClientError> {
        let request = self.gateway.request(reqwest::Method::GET, "/api/v1/config");
        self.gateway.execute(request).await
    }

    /// Update parts of the platform configuration
    pub async fn update_config(
        &self,
        update: &SystemConfigUpdate,
    ) -> Result<SystemConfig, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::PUT, "/api/v1/config")
            .json(update);
        self.gateway.execute(request).await
    }
}
