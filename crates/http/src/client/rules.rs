//! Rule management endpoints

use super::ApiClient;
use super::error::ClientError;
use crate::types::{FraudRule, NewFraudRule, PaginatedResponse, RuleFilters, RulePatch};

impl ApiClient {
    /// List rules matching the given filters
    pub async fn list_rules(
        &self,
        filters: &RuleFilters,
    ) -> Result<PaginatedResponse<FraudRule>, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, "/api/v1/rules")
            .query(filters);
        self.gateway.execute(request).await
    }

    /// Fetch a single rule by code
    pub async fn get_rule(&self, code: &str) -> Result<FraudRule, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, &format!("/api/v1/rules/{code}"));
        self.gateway.execute(request).await
    }

    /// Create a new rule
    pub async fn create_rule(&self, rule: &NewFraudRule) -> Result<FraudRule, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::POST, "/api/v1/rules")
            .json(rule);
        self.gateway.execute(request).await
    }

    /// Update fields of an existing rule
    pub async fn update_rule(&self, code: &str, patch: &RulePatch) -> Result<FraudRule, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::PUT, &format!("/api/v1/rules/{code}"))
            .json(patch);
        self.gateway.execute(request).await
    }

    /// Flip a rule between enabled and disabled
    pub async fn toggle_rule(&self, code: &str) -> Result<FraudRule, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::POST, &format!("/api/v1/rules/{code}/toggle"));
        self.gateway.execute(request).await
    }

    /// Delete a rule
    pub async fn delete_rule(&self, code: &str) -> Result<(), ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::DELETE, &format!("/api/v1/rules/{code}"));
        self.gateway.execute_empty(request).await
    }
}
