//! Session store

use crate::error::SessionError;
use sentinel_core::{Role, TokenStore, UserProfile};
use sentinel_http::client::{AuthClient, ClientError, SentinelClient};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Lifecycle of the console session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Startup state, until rehydration has run
    Loading,
    /// A user is logged in
    Authenticated,
    /// No user; credentials are required
    Anonymous,
}

#[derive(Debug)]
struct SessionState {
    user: Option<UserProfile>,
    access_token: Option<String>,
    status: SessionStatus,
}

/// Owner of the authenticated identity and its persistence.
///
/// Created once at console start and dropped at teardown. All mutation goes
/// through [`rehydrate`](Self::rehydrate), [`login`](Self::login) and
/// [`logout`](Self::logout), which keep the user and token slots in lockstep.
pub struct SessionStore {
    auth: AuthClient,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build a store over the client set's auth client and token storage
    pub fn from_client(client: &SentinelClient) -> Self {
        Self::new(client.auth().clone(), client.token_store())
    }

    pub fn new(auth: AuthClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            auth,
            tokens,
            state: RwLock::new(SessionState {
                user: None,
                access_token: None,
                status: SessionStatus::Loading,
            }),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().expect("session state poisoned").status
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().expect("session state poisoned").user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session state poisoned")
            .access_token
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().expect("session state poisoned").user.is_some()
    }

    /// Restore the session from durable storage. Runs once per console
    /// start; failures are swallowed and leave the session anonymous.
    pub async fn rehydrate(&self) {
        let Some(token) = self.tokens.access_token() else {
            self.set_anonymous();
            return;
        };

        match self.auth.me(&token).await {
            Ok(user) => {
                info!(username = %user.username, "session rehydrated");
                self.set_authenticated(user, token);
            }
            Err(error) => {
                debug!(%error, "session rehydration failed; reverting to anonymous");
                self.tokens.clear();
                self.set_anonymous();
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On success both tokens are persisted and the profile is loaded. If
    /// the profile lookup fails after the tokens were issued, the pair stays
    /// persisted and [`SessionError::ProfileFetch`] is returned; the caller
    /// may retry via [`rehydrate`](Self::rehydrate).
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let pair = match self.auth.login(username, password).await {
            Ok(pair) => pair,
            Err(ClientError::AuthenticationFailed(message)) => {
                return Err(SessionError::LoginFailed(message));
            }
            Err(error) => return Err(SessionError::Transport(error)),
        };

        self.tokens.store(&pair.access_token, &pair.refresh_token);
        {
            let mut state = self.state.write().expect("session state poisoned");
            state.access_token = Some(pair.access_token.clone());
        }

        match self.auth.me(&pair.access_token).await {
            Ok(user) => {
                info!(username = %user.username, role = %user.role, "logged in");
                self.set_authenticated(user, pair.access_token);
                Ok(())
            }
            Err(error) => {
                debug!(%error, "profile lookup failed after login");
                Err(SessionError::ProfileFetch(error))
            }
        }
    }

    /// Drop the session and both persisted tokens. Never fails; calling it
    /// on an anonymous session is a no-op.
    pub fn logout(&self) {
        self.tokens.clear();
        self.set_anonymous();
    }

    /// Whether the logged-in user holds one of the given roles
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.state
            .read()
            .expect("session state poisoned")
            .user
            .as_ref()
            .is_some_and(|user| roles.contains(&user.role))
    }

    fn set_authenticated(&self, user: UserProfile, access_token: String) {
        let mut state = self.state.write().expect("session state poisoned");
        state.user = Some(user);
        state.access_token = Some(access_token);
        state.status = SessionStatus::Authenticated;
    }

    fn set_anonymous(&self) {
        let mut state = self.state.write().expect("session state poisoned");
        state.user = None;
        state.access_token = None;
        state.status = SessionStatus::Anonymous;
    }
}
