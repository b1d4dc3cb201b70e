//! # Status List Routes
//!
//! Inbound adapter for the two status list queries. Each handler delegates
//! to the query façade in `tsl-client` and maps its outcome:
//!
//! | Outcome        | Status |
//! |----------------|--------|
//! | `Found`        | 200    |
//! | `NotFound`     | 404    |
//! | `InvalidState` | 400    |

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tsl_core::{AggregationDocument, QueryOutcome, StatusListDocument};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::state::AppState;

pub const STATUS_LIST_PATH: &str = "/ui/status-list";
pub const STATUS_LIST_AGGREGATION_PATH: &str = "/ui/status-list/aggregation";

/// Build the status list router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(STATUS_LIST_PATH, get(get_status_list))
        .route(STATUS_LIST_AGGREGATION_PATH, get(get_status_list_aggregation))
}

// -- Request/Response DTOs ----------------------------------------------------

/// Query parameters shared by both routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusListParams {
    /// Status list URL or identifier; for the aggregation route, the pool id.
    pub id: Option<String>,
}

/// A decoded status list, one value per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusListResponse {
    pub status_list: Vec<u8>,
    pub bits_per_status: u8,
    pub total_statuses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_uri: Option<String>,
}

impl From<StatusListDocument> for StatusListResponse {
    fn from(document: StatusListDocument) -> Self {
        Self {
            status_list: document.status_array.to_flat(),
            bits_per_status: document.bits_per_status,
            total_statuses: document.total_entries,
            aggregation_uri: document.aggregation_uri,
        }
    }
}

/// Status list URIs of one issuance pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AggregationResponse {
    pub status_lists: Vec<String>,
}

impl From<AggregationDocument> for AggregationResponse {
    fn from(document: AggregationDocument) -> Self {
        Self {
            status_lists: document.member_uris,
        }
    }
}

/// Map a query outcome onto the response or the matching error.
fn respond<T, R: From<T>>(outcome: QueryOutcome<T>, resource: &str) -> Result<Json<R>, AppError> {
    match outcome {
        QueryOutcome::Found(value) => Ok(Json(R::from(value))),
        QueryOutcome::NotFound => Err(AppError::NotFound(format!("{resource} not found"))),
        QueryOutcome::InvalidState => Err(AppError::BadRequest(format!(
            "{resource} could not be retrieved"
        ))),
    }
}

// -- Handlers -----------------------------------------------------------------

/// GET /ui/status-list: Fetch and decode one status list.
#[utoipa::path(
    get,
    path = "/ui/status-list",
    params(StatusListParams),
    responses(
        (status = 200, description = "Status list decoded", body = StatusListResponse),
        (status = 404, description = "Status list is empty", body = crate::error::ErrorBody),
        (status = 400, description = "Missing id, or the list could not be fetched or decoded", body = crate::error::ErrorBody),
    ),
    tag = "status_list"
)]
pub async fn get_status_list(
    State(state): State<AppState>,
    Query(params): Query<StatusListParams>,
) -> Result<Json<StatusListResponse>, AppError> {
    let outcome = state.status.status_list().query(params.id.as_deref()).await;
    respond(outcome, "status list")
}

/// GET /ui/status-list/aggregation: Fetch the status lists of a pool.
#[utoipa::path(
    get,
    path = "/ui/status-list/aggregation",
    params(StatusListParams),
    responses(
        (status = 200, description = "Pool has status lists", body = AggregationResponse),
        (status = 404, description = "Pool lists no status lists", body = crate::error::ErrorBody),
        (status = 400, description = "No pool, or the aggregation could not be fetched or parsed", body = crate::error::ErrorBody),
    ),
    tag = "status_list"
)]
pub async fn get_status_list_aggregation(
    State(state): State<AppState>,
    Query(params): Query<StatusListParams>,
) -> Result<Json<AggregationResponse>, AppError> {
    let outcome = state.status.aggregation().query(params.id.as_deref()).await;
    respond(outcome, "status list aggregation")
}
