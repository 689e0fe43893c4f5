//! Integration tests for the Sentinel HTTP clients

use sentinel_core::{MemoryTokenStore, TokenStore};
use sentinel_http::client::{ClientError, SentinelClient};
use sentinel_http::types::{
    AlertFilters, AlertStatus, RuleFilters, SystemConfigUpdate,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alert_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "transaction_id": "txn-1",
        "customer_id": "cust-1",
        "risk_score": 82.5,
        "decision": "flag",
        "decision_tier": "FLAG",
        "decision_tier_description": "High risk",
        "status": "pending",
        "triggered_rules": [{
            "code": "AMT_001",
            "name": "Large amount",
            "category": "amount",
            "severity": "high",
            "score": 40.0,
            "description": null
        }],
        "processing_time_ms": 12.5,
        "reviewed_by": null,
        "reviewed_at": null,
        "review_notes": null,
        "created_at": "2026-08-01T12:00:00Z",
        "updated_at": "2026-08-01T12:00:00Z",
        "transaction": {
            "external_id": "ext-1",
            "amount": 1250.0,
            "currency": "USD",
            "transaction_type": "purchase",
            "channel": "online",
            "merchant_name": "Acme Market",
            "location_country": "US",
            "transaction_time": "2026-08-01T11:59:30Z"
        }
    })
}

fn rule_json(code: &str, enabled: bool) -> serde_json::Value {
    json!({
        "code": code,
        "name": "Large amount",
        "description": "Flags unusually large transactions",
        "category": "amount",
        "severity": "high",
        "score": 40.0,
        "enabled": enabled,
        "conditions": {"field": "amount", "op": "gt", "value": 10000},
        "effective_from": null,
        "effective_to": null,
        "created_at": "2026-07-01T00:00:00Z",
        "updated_at": "2026-07-15T00:00:00Z"
    })
}

fn client_for(server: &MockServer, store: Arc<dyn TokenStore>) -> SentinelClient {
    SentinelClient::builder()
        .api_url(server.uri())
        .auth_url(server.uri())
        .token_store(store)
        .build()
        .unwrap()
}

#[tokio::test]
async fn builder_requires_both_base_urls() {
    let result = SentinelClient::builder().api_url("http://localhost:8000").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = SentinelClient::builder().auth_url("http://localhost:8001").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn builder_trims_trailing_slashes() {
    let client = SentinelClient::builder()
        .api_url("http://localhost:8000/")
        .auth_url("http://localhost:8001/")
        .build()
        .unwrap();
    assert_eq!(client.api().base_url(), "http://localhost:8000");
    assert_eq!(client.banking().base_url(), "http://localhost:8001");
}

#[tokio::test]
async fn stored_access_token_is_attached_as_bearer() {
    let mock_server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::new());
    store.store("access-123", "refresh-123");

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/a-1"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a-1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, store);
    let alert = client.api().get_alert("a-1").await.unwrap();
    assert_eq!(alert.id, "a-1");
    assert_eq!(alert.status, AlertStatus::Pending);
}

#[tokio::test]
async fn requests_without_stored_token_carry_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/a-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a-1")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    client.api().get_alert("a-1").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn list_alerts_passes_filters_as_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts"))
        .and(query_param("status", "pending"))
        .and(query_param("min_score", "70.5"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [alert_json("a-1")],
            "total": 1,
            "page": 2,
            "size": 20,
            "pages": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    let filters = AlertFilters {
        status: Some(AlertStatus::Pending),
        min_score: Some(70.5),
        page: Some(2),
        ..AlertFilters::default()
    };
    let page = client.api().list_alerts(&filters).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "a-1");
}

#[tokio::test]
async fn daily_volume_sends_days_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/stats/daily-volume"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2026-08-01", "alerts": 12},
            {"date": "2026-08-02", "alerts": 8}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    let volume = client.api().daily_volume(7).await.unwrap();
    assert_eq!(volume.len(), 2);
    assert_eq!(volume[0].alerts, 12);
}

#[tokio::test]
async fn toggle_rule_posts_to_toggle_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/rules/AMT_001/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_json("AMT_001", false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    let rule = client.api().toggle_rule("AMT_001").await.unwrap();
    assert!(!rule.enabled);
}

#[tokio::test]
async fn list_rules_passes_enabled_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rules"))
        .and(query_param("enabled", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [rule_json("AMT_001", true)],
            "total": 1,
            "page": 1,
            "size": 20,
            "pages": 1
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    let filters = RuleFilters {
        enabled: Some(true),
        ..RuleFilters::default()
    };
    let page = client.api().list_rules(&filters).await.unwrap();
    assert_eq!(page.items[0].code, "AMT_001");
}

#[tokio::test]
async fn delete_rule_accepts_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/rules/AMT_001"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    client.api().delete_rule("AMT_001").await.unwrap();
}

#[tokio::test]
async fn update_config_sends_only_present_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/config"))
        .and(body_json(json!({"auto_escalation_threshold": 90.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auto_escalation_threshold": 90.0,
            "data_retention_days": 365
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));
    let update = SystemConfigUpdate {
        auto_escalation_threshold: Some(90.0),
        data_retention_days: None,
    };
    let config = client.api().update_config(&update).await.unwrap();
    assert_eq!(config.data_retention_days, 365);
}

#[tokio::test]
async fn health_is_probed_without_credentials() {
    let mock_server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::new());
    store.store("access-123", "refresh-123");

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "service": "fraud-detection",
            "version": "2.4.1"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, store);
    let health = client.api().health().await.unwrap();
    assert_eq!(health.status, "ok");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn customer_summary_decodes_decimal_fields() {
    let mock_server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::new());
    store.store("access-123", "refresh-123");

    Mock::given(method("GET"))
        .and(path("/api/v1/customers/cust-1/summary"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customer_id": "cust-1",
            "full_name": "Jordan Smith",
            "tier": "gold",
            "kyc_status": "verified",
            "account_age_days": 820,
            "total_accounts": 3,
            "total_transactions_30d": 42,
            "total_spend_30d": "15230.75",
            "avg_transaction_amount": "362.64",
            "risk_rating": "low"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, store);
    let summary = client.banking().customer_summary("cust-1").await.unwrap();
    assert_eq!(summary.full_name, "Jordan Smith");
    assert_eq!(summary.total_spend_30d.to_string(), "15230.75");
}

#[tokio::test]
async fn error_statuses_map_to_the_taxonomy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such alert"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad id"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/boom"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Arc::new(MemoryTokenStore::new()));

    let result = client.api().get_alert("missing").await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));

    let result = client.api().get_alert("bad").await;
    assert!(matches!(result, Err(ClientError::BadRequest(_))));

    let result = client.api().get_alert("boom").await;
    assert!(matches!(
        result,
        Err(ClientError::ServerError { status: 500, .. })
    ));
}
