//! Wire types for the fraud-detection and core-banking APIs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Review lifecycle of a fraud alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Confirmed,
    Dismissed,
    Escalated,
}

/// Automated decision recorded when the alert was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDecision {
    Approve,
    Review,
    Flag,
}

/// Decision tier reported by the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionTier {
    Approve,
    Review,
    Flag,
}

/// Verdict an analyst records when closing out an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    Confirmed,
    Dismissed,
    Escalated,
}

/// Rule that fired during transaction scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredRule {
    pub code: String,
    pub name: String,
    pub category: String,
    pub severity: String,
    pub score: f64,
    pub description: Option<String>,
}

/// Transaction the alert was raised against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTransaction {
    pub external_id: String,
    pub amount: f64,
    pub currency: String,
    pub transaction_type: String,
    pub channel: String,
    pub merchant_name: Option<String>,
    pub location_country: Option<String>,
    pub transaction_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    pub id: String,
    pub transaction_id: String,
    pub customer_id: String,
    pub risk_score: f64,
    pub decision: AlertDecision,
    pub decision_tier: Option<DecisionTier>,
    pub decision_tier_description: Option<String>,
    pub status: AlertStatus,
    pub triggered_rules: Vec<TriggeredRule>,
    pub processing_time_ms: Option<f64>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub transaction: Option<AlertTransaction>,
}

/// Page of results as returned by the list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

/// Query filters for the alert list endpoint; `None` fields are omitted
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertFilters {
    pub status: Option<AlertStatus>,
    pub customer_id: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub decision: Option<AlertDecision>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Analyst review submitted against an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReview {
    pub status: ReviewVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertStats {
    pub total: u64,
    pub by_status: HashMap<String, u64>,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub alerts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub auto_escalation_threshold: f64,
    pub data_retention_days: u32,
}

/// Partial config update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_escalation_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_retention_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRule {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub severity: String,
    pub score: f64,
    pub enabled: bool,
    pub conditions: serde_json::Value,
    pub effective_from: Option<DateTime<Utc>>,
    pub effective_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a rule; server stamps the timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFraudRule {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub severity: String,
    pub score: f64,
    pub enabled: bool,
    pub conditions: serde_json::Value,
    pub effective_from: Option<DateTime<Utc>>,
    pub effective_to: Option<DateTime<Utc>>,
}

/// Partial rule update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

/// Query filters for the rule list endpoint; `None` fields are omitted
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleFilters {
    pub enabled: Option<bool>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// 30-day customer profile served by the core-banking API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub full_name: String,
    pub tier: String,
    pub kyc_status: String,
    pub account_age_days: u32,
    pub total_accounts: u32,
    pub total_transactions_30d: u64,
    pub total_spend_30d: Decimal,
    pub avg_transaction_amount: Decimal,
    pub risk_rating: String,
}
