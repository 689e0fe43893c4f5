//! Auth endpoints on the core-banking service
//!
//! Token issuance lives under `/api/v1/auth/admin` on the banking side, not
//! on the fraud API. The login endpoint takes form-encoded credentials; the
//! refresh endpoint takes the refresh token as JSON and rotates the pair.

use super::error::ClientError;
use sentinel_core::{ErrorBody, TokenPair, UserProfile};
use serde::Serialize;

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Client for the admin auth endpoints
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Get the base URL of the auth service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api/v1/auth/admin{}", self.base_url, path);
        self.http.request(method, url)
    }

    /// Exchange credentials for a token pair.
    ///
    /// Any rejection surfaces as [`ClientError::AuthenticationFailed`]
    /// carrying the server's `detail` message when it sends one.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Err(ClientError::AuthenticationFailed(
            detail.unwrap_or_else(|| "Login failed".to_owned()),
        ))
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// A non-2xx response means the refresh token itself is invalid or
    /// expired; the caller must treat the session as unrecoverable.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        let request = self
            .request(reqwest::Method::POST, "/refresh")
            .json(&RefreshRequest { refresh_token });
        self.execute(request).await
    }

    /// Look up the profile behind an access token
    pub async fn me(&self, access_token: &str) -> Result<UserProfile, ClientError> {
        let request = self
            .request(reqwest::Method::GET, "/me")
            .bearer_auth(access_token);
        self.execute(request).await
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}
