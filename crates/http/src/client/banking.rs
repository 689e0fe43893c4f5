//! Customer endpoints on the core-banking service

use super::BankingClient;
use super::error::ClientError;
use crate::types::CustomerSummary;

impl BankingClient {
    /// Fetch the 30-day summary for a customer
    pub async fn customer_summary(
        &self,
        customer_id: &str,
    ) -> Result<CustomerSummary, ClientError> {
        let request = self.gateway.request(
            reqwest::Method::GET,
            &format!("/api/v1/customers/{customer_id}/summary"),
        );
        self.gateway.execute(request).await
    }
}
