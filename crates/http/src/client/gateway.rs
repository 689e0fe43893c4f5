//! Authenticated request gateway
//!
//! Wraps outbound calls to a service with bearer-token attachment and
//! recovery from token expiry. The access token is re-read from the store on
//! every dispatch, so a rotation performed by one request is visible to the
//! next. A 401 triggers at most one refresh-and-retry per logical request;
//! concurrent 401s share a single refresh call through [`SingleFlight`].

use super::auth::AuthClient;
use super::error::ClientError;
use super::singleflight::SingleFlight;
use reqwest::StatusCode;
use sentinel_core::TokenStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback fired when the session can no longer be recovered and the
/// operator has to log in again. Stands in for the console's login redirect.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

struct GatewayInner {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    auth: AuthClient,
    refresh_flight: Arc<SingleFlight<Option<String>>>,
    on_session_expired: Option<SessionExpiredHook>,
}

/// Bearer-authenticated transport to one service
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: String,
        tokens: Arc<dyn TokenStore>,
        auth: AuthClient,
        refresh_flight: Arc<SingleFlight<Option<String>>>,
        on_session_expired: Option<SessionExpiredHook>,
    ) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                http,
                base_url,
                tokens,
                auth,
                refresh_flight,
                on_session_expired,
            }),
        }
    }

    /// Get the base URL of the service behind this gateway
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Create a request builder; the bearer header is attached at dispatch
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        self.inner.http.request(method, url)
    }

    /// Execute a request and decode the JSON response
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send_with_refresh(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request, discarding the response body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.send_with_refresh(request).await?;
        Ok(())
    }

    /// Execute a request without attaching credentials (health probes)
    pub(crate) async fn execute_public<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::into_result(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Dispatch with the stored access token; on 401, refresh once and retry
    /// once. A request that 401s again after the retry is not retried a
    /// second time.
    async fn send_with_refresh(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let retry = request.try_clone();

        let request = match self.inner.tokens.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::into_result(response).await;
        }

        // Streaming bodies cannot be replayed; surface the 401 unchanged.
        let Some(retry) = retry else {
            return Self::into_result(response).await;
        };

        match self.refresh_access_token().await {
            Some(token) => {
                debug!("retrying request with refreshed access token");
                let retried = retry.bearer_auth(token).send().await?;
                Self::into_result(retried).await
            }
            None => Self::into_result(response).await,
        }
    }

    /// Run (or join) the shared refresh cycle, returning the new access
    /// token, or `None` when the session is unrecoverable.
    async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresh_token) = self.inner.tokens.refresh_token() else {
            self.inner.tokens.clear_access();
            self.notify_session_expired();
            return None;
        };

        let auth = self.inner.auth.clone();
        let tokens = Arc::clone(&self.inner.tokens);
        let hook = self.inner.on_session_expired.clone();
        self.inner
            .refresh_flight
            .run(move || async move {
                match auth.refresh(&refresh_token).await {
                    Ok(pair) => {
                        tokens.store(&pair.access_token, &pair.refresh_token);
                        debug!("access token refreshed");
                        Some(pair.access_token)
                    }
                    Err(error) => {
                        warn!(%error, "token refresh failed; clearing session");
                        tokens.clear();
                        if let Some(hook) = hook {
                            hook();
                        }
                        None
                    }
                }
            })
            .await
    }

    fn notify_session_expired(&self) {
        if let Some(hook) = &self.inner.on_session_expired {
            hook();
        }
    }

    async fn into_result(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}
