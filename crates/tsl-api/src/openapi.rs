//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Token Status List API",
        version = "0.1.0",
        description = "Lookup of remotely published token status lists and pool aggregation documents."
    ),
    paths(
        crate::routes::status_list::get_status_list,
        crate::routes::status_list::get_status_list_aggregation,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::status_list::StatusListResponse,
        crate::routes::status_list::AggregationResponse,
    )),
    tags(
        (name = "status_list", description = "Status list and aggregation lookups"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
