//! # tsl-client -- Remote status list access
//!
//! Fetches token status lists and pool aggregation documents and classifies
//! every answer as `Found`, `NotFound`, or `InvalidState`:
//!
//! - **Status lists** (`status_list.rs`): GET, parse the token, decode the list.
//! - **Aggregations** (`aggregation.rs`): GET `{base}/{pool}`, parse `status_lists`.
//! - **Queries** (`query.rs`): the operations inbound adapters call, plus
//!   per-entry status resolution.
//! - **Annotation** (`annotate.rs`): live status for disclosed attestations.
//!
//! ## Crate Policy
//!
//! - Failures never escape the public query operations; they are logged
//!   with `tracing::warn!` and collapse to `InvalidState`. The `try_fetch`
//!   methods keep the cause for diagnostics.
//! - No caching and no retries. Each call is one fetch-decode cycle.
//! - Outbound I/O goes through the [`Transport`] trait only.

pub mod aggregation;
pub mod annotate;
pub mod config;
pub mod error;
pub mod query;
pub mod status_list;
pub mod transport;

pub use aggregation::AggregationClient;
pub use annotate::{DocumentStatus, StatusAnnotator};
pub use config::{ConfigError, StatusClientConfig};
pub use error::{ClientError, TransportError};
pub use query::{GetStatusList, GetStatusListAggregation};
pub use status_list::StatusListClient;
pub use transport::{HttpTransport, Transport};

use std::sync::Arc;

use tsl_core::StatusTokenParser;

/// Top-level client. Holds the query façade and annotator over one shared
/// transport.
#[derive(Debug, Clone)]
pub struct StatusClient {
    status_list: GetStatusList,
    aggregation: GetStatusListAggregation,
    annotator: StatusAnnotator,
}

impl StatusClient {
    /// Create a client that fetches over HTTP.
    pub fn new(config: StatusClientConfig) -> Result<Self, ClientError> {
        let transport = Arc::new(HttpTransport::new(config.timeout_secs)?);
        Ok(Self::with_transport(config, transport, StatusTokenParser::new()))
    }

    /// Create a client over an arbitrary transport and token parser.
    pub fn with_transport(
        config: StatusClientConfig,
        transport: Arc<dyn Transport>,
        parser: StatusTokenParser,
    ) -> Self {
        let lists = StatusListClient::new(transport.clone(), config.status_list_base_url)
            .with_parser(parser);
        let aggregations = AggregationClient::new(transport, config.aggregation_base_url);

        Self {
            status_list: GetStatusList::new(lists.clone()),
            aggregation: GetStatusListAggregation::new(aggregations, config.pool_id),
            annotator: StatusAnnotator::new(lists, config.status_enrichment_enabled),
        }
    }

    /// Status list lookups.
    pub fn status_list(&self) -> &GetStatusList {
        &self.status_list
    }

    /// Pool aggregation lookups.
    pub fn aggregation(&self) -> &GetStatusListAggregation {
        &self.aggregation
    }

    /// Presentation annotation.
    pub fn annotator(&self) -> &StatusAnnotator {
        &self.annotator
    }
}
