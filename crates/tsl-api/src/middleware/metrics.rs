//! # Lookup Metrics
//!
//! Counts status list lookups by the outcome the route answered with.
//! Routes map `Found` to 200, `NotFound` to 404 and `InvalidState` to 400,
//! so the middleware classifies on the response status alone and never
//! looks at bodies. Requests outside `/ui/status-list*` are not counted.
//!
//! Counters live behind one `Arc` and are shared through an
//! `axum::Extension`; clones observe the same totals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::routes::status_list::STATUS_LIST_PATH;

#[derive(Debug, Default)]
struct Counters {
    lookups: AtomicU64,
    found: AtomicU64,
    not_found: AtomicU64,
    invalid_state: AtomicU64,
}

/// Shared lookup counters.
#[derive(Debug, Clone, Default)]
pub struct LookupMetrics {
    counters: Arc<Counters>,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status list and aggregation lookups served.
    pub fn lookups(&self) -> u64 {
        self.counters.lookups.load(Ordering::Relaxed)
    }

    pub fn found(&self) -> u64 {
        self.counters.found.load(Ordering::Relaxed)
    }

    pub fn not_found(&self) -> u64 {
        self.counters.not_found.load(Ordering::Relaxed)
    }

    /// Lookups with a missing id, an unreachable issuer or an undecodable list.
    pub fn invalid_state(&self) -> u64 {
        self.counters.invalid_state.load(Ordering::Relaxed)
    }

    fn record(&self, status: StatusCode) {
        let c = &self.counters;
        c.lookups.fetch_add(1, Ordering::Relaxed);
        let outcome = match status {
            StatusCode::OK => &c.found,
            StatusCode::NOT_FOUND => &c.not_found,
            StatusCode::BAD_REQUEST => &c.invalid_state,
            _ => return,
        };
        outcome.fetch_add(1, Ordering::Relaxed);
    }
}

/// Middleware recording the outcome of every status list lookup.
pub async fn lookup_metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request
        .uri()
        .path()
        .starts_with(STATUS_LIST_PATH)
        .then(|| request.extensions().get::<LookupMetrics>().cloned())
        .flatten();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record(response.status());
    }
    response
}
