//! Sentinel HTTP clients
//!
//! Typed clients for the two services behind the fraud console: the
//! fraud-detection API (alerts, rules, stats, config) and the core-banking
//! API (auth token issuance, customer summaries). Authenticated traffic goes
//! through a gateway that attaches the stored bearer token at dispatch time
//! and transparently recovers from token expiry with a deduplicated
//! refresh-and-retry cycle.

pub mod client;
pub mod types;

pub use client::{
    ApiClient, AuthClient, BankingClient, ClientError, SentinelClient, SentinelClientBuilder,
};
