//! Status client configuration.
//!
//! Base URLs, the default issuance pool, the request timeout, and the
//! enrichment toggle are carried as one explicit value handed to the client
//! constructors. `from_env` is the only place process state is read.

use url::Url;

/// Configuration for the status list and aggregation clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClientConfig {
    /// Base URL that opaque status list identifiers are resolved against.
    /// Full URLs are fetched as-is and do not need it.
    pub status_list_base_url: Option<Url>,
    /// Base URL of the aggregation service; pools live at `{base}/{pool_id}`.
    pub aggregation_base_url: Option<Url>,
    /// Pool queried when the caller does not name one.
    pub pool_id: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Whether presentations are annotated with live status.
    pub status_enrichment_enabled: bool,
}

impl Default for StatusClientConfig {
    fn default() -> Self {
        Self {
            status_list_base_url: None,
            aggregation_base_url: None,
            pool_id: None,
            timeout_secs: 30,
            status_enrichment_enabled: true,
        }
    }
}

impl StatusClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STATUS_LIST_BASE_URL` (optional)
    /// - `STATUS_LIST_AGGREGATION_URL` (optional)
    /// - `STATUS_LIST_POOL_ID` (optional)
    /// - `STATUS_LIST_TIMEOUT_SECS` (default: 30)
    /// - `STATUS_LIST_ENABLED` (default: `true`; anything other than `true`
    ///   or `false` disables enrichment)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            status_list_base_url: env_url("STATUS_LIST_BASE_URL")?,
            aggregation_base_url: env_url("STATUS_LIST_AGGREGATION_URL")?,
            pool_id: std::env::var("STATUS_LIST_POOL_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            timeout_secs: std::env::var("STATUS_LIST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            status_enrichment_enabled: std::env::var("STATUS_LIST_ENABLED")
                .map(|s| parse_strict_bool(&s).unwrap_or(false))
                .unwrap_or(true),
        })
    }

    /// Create a configuration pointing every base URL at one local mock
    /// server (for testing).
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            status_list_base_url: Some(url.clone()),
            aggregation_base_url: Some(url),
            pool_id: None,
            timeout_secs: 5,
            status_enrichment_enabled: true,
        })
    }
}

fn env_url(var: &str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => Url::parse(raw.trim())
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string())),
        _ => Ok(None),
    }
}

/// `Some(true)` / `Some(false)` for exactly `true` / `false`, `None` otherwise.
fn parse_strict_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
