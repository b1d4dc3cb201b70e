//! # tsl-api — Axum Adapter for Token Status Lists
//!
//! HTTP surface over the status list query façade.
//!
//! ## API Surface
//!
//! | Path                           | Module                    | Answer               |
//! |--------------------------------|---------------------------|----------------------|
//! | `/ui/status-list?id=`          | [`routes::status_list`]   | decoded status list  |
//! | `/ui/status-list/aggregation`  | [`routes::status_list`]   | pool aggregation     |
//! | `/openapi.json`                | [`openapi`]               | OpenAPI document     |
//! | `/health/*`                    | this module               | probes               |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → LookupMetrics → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No decoding logic in handlers; they call `tsl-client` and map the
//!   outcome.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::LookupMetrics;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, LookupMetrics::new())
}

/// Like [`app`], counting lookup outcomes into `metrics`.
pub fn app_with_metrics(state: AppState, metrics: LookupMetrics) -> Router {
    let api = Router::new()
        .merge(routes::status_list::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::lookup_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
