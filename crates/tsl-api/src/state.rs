//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the configuration and the status client;
//! nothing is cached between requests.

use tsl_client::{ClientError, ConfigError, StatusClient, StatusClientConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Status list client settings.
    pub status: StatusClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `PORT` (default: 8080) plus the variables read by
    /// [`StatusClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            status: StatusClientConfig::from_env()?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            status: StatusClientConfig::default(),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub status: StatusClient,
}

impl AppState {
    /// Build state with an HTTP status client.
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let status = StatusClient::new(config.status.clone())?;
        Ok(Self { config, status })
    }

    /// Build state around an existing client.
    pub fn with_client(config: AppConfig, status: StatusClient) -> Self {
        Self { config, status }
    }
}
