//! Client for pool aggregation documents.
//!
//! `GET {aggregation_base_url}/{pool_id}` returning
//! `{"status_lists": [uri, ...]}`. An empty list is `NotFound`.

use std::sync::Arc;

use tsl_core::{AggregationDocument, QueryOutcome};
use url::Url;

use crate::error::ClientError;
use crate::transport::{append_segment, Transport};

/// Client for the aggregation service.
#[derive(Debug, Clone)]
pub struct AggregationClient {
    transport: Arc<dyn Transport>,
    base_url: Option<Url>,
}

impl AggregationClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: Option<Url>) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Fetch the status lists of `pool_id`.
    pub async fn fetch(&self, pool_id: &str) -> QueryOutcome<AggregationDocument> {
        match self.try_fetch(pool_id).await {
            Ok(document) => {
                tracing::debug!(pool_id, lists = document.member_uris.len(), "fetched aggregation");
                QueryOutcome::found_unless(document, AggregationDocument::is_empty)
            }
            Err(err) => {
                tracing::warn!(pool_id, error = %err, "aggregation unavailable");
                QueryOutcome::InvalidState
            }
        }
    }

    /// Fetch and parse, keeping the failure cause.
    pub async fn try_fetch(&self, pool_id: &str) -> Result<AggregationDocument, ClientError> {
        let base = self
            .base_url
            .as_ref()
            .ok_or(ClientError::NotConfigured("aggregation base URL"))?;
        let url = append_segment(base, pool_id)?;
        let body = self.transport.fetch(&url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
