//! # tsl-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the status list API.
//! Binds to configurable port (default 8080).

use tsl_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    if config.status.status_list_base_url.is_none() {
        tracing::warn!("STATUS_LIST_BASE_URL not set; only full status list URLs will resolve");
    }
    if config.status.aggregation_base_url.is_none() {
        tracing::warn!("STATUS_LIST_AGGREGATION_URL not set; aggregation lookups will return 400");
    }

    let port = config.port;
    let state = AppState::new(config)?;
    let app = tsl_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Status list API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
