//! Client error types.
//!
//! These never reach callers of the public query operations, which collapse
//! every failure to [`QueryOutcome::InvalidState`](tsl_core::QueryOutcome).
//! They exist so the collapse can be logged with its cause.

use tsl_core::StatusListError;

use crate::config::ConfigError;

/// Failure fetching bytes from a URL.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS, or timeout failure.
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The target URL could not be built.
    #[error("invalid URL {0}: {1}")]
    InvalidUrl(String, String),
}

/// Failure during one fetch-and-decode cycle.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The status list body did not parse or decode.
    #[error("status list rejected: {0}")]
    StatusList(#[from] StatusListError),

    /// The aggregation body was not `{"status_lists": [..]}`.
    #[error("aggregation document rejected: {0}")]
    Aggregation(#[from] serde_json::Error),

    /// A required setting is absent.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
