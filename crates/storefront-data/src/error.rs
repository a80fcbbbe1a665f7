//! Error taxonomy for remote data access.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a remote data call, after any retries.
///
/// Transient transport problems (`Timeout`, `Network`, `Server`) are only
/// returned once the retry budget is spent; everything else is immediate.
#[derive(Debug, Error)]
pub enum DataError {
    /// The attempt budget was spent on request timeouts.
    #[error("the commerce API did not respond in time")]
    Timeout,

    /// Connection-level failure (refused, DNS, aborted transfer).
    #[error("network error reaching the commerce API: {0}")]
    Network(String),

    /// Rate limiting or server-side failure that outlived the retries.
    #[error("commerce API returned HTTP {status}")]
    Server { status: u16 },

    /// Non-retryable application error (bad request, auth failure).
    #[error("commerce API rejected the request: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not a valid GraphQL payload.
    #[error("failed to decode commerce API response: {0}")]
    Decode(String),

    /// The client could not be constructed from the given configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl DataError {
    /// Human-readable failure category for caller-side messaging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network(_) => "network",
            Self::Server { .. } => "server",
            Self::Api { .. } => "api",
            Self::Decode(_) => "decode",
            Self::Config(_) => "config",
        }
    }

    /// Whether this failure was transient (and therefore was retried).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_) | Self::Server { .. })
    }
}

/// Location of a GraphQL error within the query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// A GraphQL-level error returned in the response `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    /// Human-readable message.
    pub message: String,
    /// Query locations, when supplied.
    #[serde(default)]
    pub locations: Vec<GraphqlErrorLocation>,
    /// Response path segments, when supplied.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}
