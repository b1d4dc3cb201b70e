//! # Query Façade
//!
//! The operations exposed to inbound adapters. Input validation happens
//! here: a missing identifier is `InvalidState` before any fetch.

use tsl_core::{AggregationDocument, QueryOutcome, StatusListDocument, StatusListReference};

use crate::aggregation::AggregationClient;
use crate::status_list::StatusListClient;

/// Look up one status list by identifier or URL.
#[derive(Debug, Clone)]
pub struct GetStatusList {
    client: StatusListClient,
}

impl GetStatusList {
    pub fn new(client: StatusListClient) -> Self {
        Self { client }
    }

    /// Fetch the list named by `id`.
    pub async fn query(&self, id: Option<&str>) -> QueryOutcome<StatusListDocument> {
        let Some(id) = non_blank(id) else {
            tracing::info!("status list query without an identifier");
            return QueryOutcome::InvalidState;
        };
        tracing::info!(id, "getting status list");
        self.client.fetch(id).await
    }

    /// Live status of the entry `reference` points at.
    ///
    /// `None` when the list cannot be fetched, is empty, or does not cover
    /// the index.
    pub async fn resolve_status(&self, reference: &StatusListReference) -> Option<u8> {
        self.client
            .fetch(&reference.uri)
            .await
            .found()
            .and_then(|document| document.status(reference.index))
    }
}

/// Look up the status lists of an issuance pool.
#[derive(Debug, Clone)]
pub struct GetStatusListAggregation {
    client: AggregationClient,
    default_pool: Option<String>,
}

impl GetStatusListAggregation {
    /// `default_pool` answers queries that do not name a pool.
    pub fn new(client: AggregationClient, default_pool: Option<String>) -> Self {
        Self {
            client,
            default_pool,
        }
    }

    /// Fetch the aggregation of `pool_id`, or of the default pool.
    pub async fn query(&self, pool_id: Option<&str>) -> QueryOutcome<AggregationDocument> {
        let Some(pool_id) = non_blank(pool_id).or(non_blank(self.default_pool.as_deref())) else {
            tracing::info!("aggregation query without a pool");
            return QueryOutcome::InvalidState;
        };
        tracing::info!(pool_id, "getting status list aggregation");
        self.client.fetch(pool_id).await
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
