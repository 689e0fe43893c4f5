//! Sentinel session lifecycle
//!
//! Owns the authenticated identity of the console: who is logged in, which
//! access token backs their requests, and whether the session has been
//! restored from durable storage yet. Tokens and user are only ever mutated
//! together; if a user is present, so is an access token.

pub mod error;
pub mod store;

pub use error::SessionError;
pub use store::{SessionStatus, SessionStore};
