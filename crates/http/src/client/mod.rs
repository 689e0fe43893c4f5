//! Sentinel HTTP client set

pub mod alerts;
pub mod auth;
pub mod banking;
pub mod error;
pub mod gateway;
pub mod rules;
pub mod singleflight;
pub mod system;

pub use auth::AuthClient;
pub use error::ClientError;
pub use gateway::{Gateway, SessionExpiredHook};
pub use singleflight::SingleFlight;

use sentinel_core::{MemoryTokenStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;

/// Client for the fraud-detection API (alerts, rules, stats, config)
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) gateway: Gateway,
}

impl ApiClient {
    /// Get the base URL of the fraud-detection service
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }
}

/// Client for the core-banking API (customer lookups)
#[derive(Clone)]
pub struct BankingClient {
    pub(crate) gateway: Gateway,
}

impl BankingClient {
    /// Get the base URL of the core-banking service
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }
}

/// The console's client set: one auth client plus two authenticated gateways
/// sharing a token store and a single refresh flight.
#[derive(Clone)]
pub struct SentinelClient {
    auth: AuthClient,
    api: ApiClient,
    banking: BankingClient,
    tokens: Arc<dyn TokenStore>,
}

impl SentinelClient {
    /// Create a new client set builder
    pub fn builder() -> SentinelClientBuilder {
        SentinelClientBuilder::default()
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn banking(&self) -> &BankingClient {
        &self.banking
    }

    /// The token store shared by both gateways
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }
}

/// Builder for [`SentinelClient`]
#[derive(Default)]
pub struct SentinelClientBuilder {
    api_url: Option<String>,
    auth_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl SentinelClientBuilder {
    /// Set the fraud-detection API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the core-banking/auth API base URL
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use the given token store instead of an ephemeral in-memory one
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Install a callback fired when the session becomes unrecoverable
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// Build the client set
    pub fn build(self) -> Result<SentinelClient, ClientError> {
        let api_url = self
            .api_url
            .ok_or_else(|| ClientError::Configuration("api_url is required".into()))?;
        let auth_url = self
            .auth_url
            .ok_or_else(|| ClientError::Configuration("auth_url is required".into()))?;

        let api_url = api_url.trim_end_matches('/').to_string();
        let auth_url = auth_url.trim_end_matches('/').to_string();

        let mut client_builder = reqwest::ClientBuilder::new();
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("sentinel-console/0.1.0");
        }
        let http = client_builder.build()?;

        let tokens: Arc<dyn TokenStore> = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        let auth = AuthClient::new(http.clone(), auth_url.clone());
        let refresh_flight = Arc::new(SingleFlight::new());

        let api = ApiClient {
            gateway: Gateway::new(
                http.clone(),
                api_url,
                Arc::clone(&tokens),
                auth.clone(),
                Arc::clone(&refresh_flight),
                self.on_session_expired.clone(),
            ),
        };
        let banking = BankingClient {
            gateway: Gateway::new(
                http,
                auth_url,
                Arc::clone(&tokens),
                auth.clone(),
                refresh_flight,
                self.on_session_expired,
            ),
        };

        Ok(SentinelClient {
            auth,
            api,
            banking,
            tokens,
        })
    }
}
