//! Session error types

use sentinel_http::client::ClientError;
use thiserror::Error;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    /// The auth service rejected the credentials; the message is the
    /// server's `detail` field when it sent one
    #[error("{0}")]
    LoginFailed(String),

    /// Tokens were issued and persisted, but the profile lookup failed.
    /// Distinct from a credential failure: the pair is valid and kept.
    #[error("Failed to fetch user profile")]
    ProfileFetch(#[source] ClientError),

    /// Transport-level failure before the server could answer
    #[error(transparent)]
    Transport(#[from] ClientError),
}
