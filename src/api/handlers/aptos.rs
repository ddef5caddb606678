//! Aptos endpoints.
//!
//! The Aptos API requires a `limit`; when the caller gives no page size the
//! default of 10 is sent.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::instrument;

use crate::api::extractors::ApiQuery;
use crate::api::handlers::required;
use crate::api::middleware::error::ApiError;
use crate::api::models::AptosAccountQuery;
use crate::app_state::AppState;
use crate::upstream::{Service, UpstreamRequest};

const DEFAULT_LIMIT: &str = "10";

#[utoipa::path(
    get,
    path = "/getaccounttransactions",
    params(AptosAccountQuery),
    responses(
        (status = 200, description = "Aptos transactions as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Aptos"
)]
/// Returns transactions sent by an Aptos account.
#[instrument(skip(state))]
pub async fn get_account_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AptosAccountQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = required("address", query.address)?;

    let path = ["accounts", address.as_str(), "transactions"];
    let request = UpstreamRequest::get(Service::Aptos, path)
        .param("limit", query.page_size.as_deref().unwrap_or(DEFAULT_LIMIT))
        .opt_param("offset", query.offset);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/getcoins",
    params(AptosAccountQuery),
    responses(
        (status = 200, description = "Coins created by the address"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Aptos"
)]
/// Returns coins created by an Aptos address.
#[instrument(skip(state))]
pub async fn get_coins_by_creator(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AptosAccountQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = required("address", query.address)?;

    let request = UpstreamRequest::get(Service::Aptos, ["coins", "creators"])
        .param("creator_addresses", address)
        .param("limit", query.page_size.as_deref().unwrap_or(DEFAULT_LIMIT))
        .opt_param("offset", query.offset);

    Ok(Json(state.api.call(request).await?))
}
