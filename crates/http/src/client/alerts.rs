//! Alert endpoints

use super::ApiClient;
use super::error::ClientError;
use crate::types::{AlertFilters, AlertReview, AlertStats, DailyVolume, FraudAlert, PaginatedResponse};

impl ApiClient {
    /// List alerts matching the given filters
    pub async fn list_alerts(
        &self,
        filters: &AlertFilters,
    ) -> Result<PaginatedResponse<FraudAlert>, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, "/api/v1/alerts")
            .query(filters);
        self.gateway.execute(request).await
    }

    /// Fetch a single alert
    pub async fn get_alert(&self, id: &str) -> Result<FraudAlert, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, &format!("/api/v1/alerts/{id}"));
        self.gateway.execute(request).await
    }

    /// Record an analyst verdict against an alert
    pub async fn review_alert(
        &self,
        id: &str,
        review: &AlertReview,
    ) -> Result<FraudAlert, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::POST, &format!("/api/v1/alerts/{id}/review"))
            .json(review);
        self.gateway.execute(request).await
    }

    /// Aggregate alert counts and average score
    pub async fn alert_stats(&self) -> Result<AlertStats, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, "/api/v1/alerts/stats/summary");
        self.gateway.execute(request).await
    }

    /// Per-day alert counts over the trailing window
    pub async fn daily_volume(&self, days: u32) -> Result<Vec<DailyVolume>, ClientError> {
        let request = self
            .gateway
            .request(reqwest::Method::GET, "/api/v1/alerts/stats/daily-volume")
            .query(&[("days", days)]);
        self.gateway.execute(request).await
    }
}
