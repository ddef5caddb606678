//! Account endpoints: transactions, balances, token holdings, NFT transfers.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::extractors::ApiQuery;
use crate::api::handlers::required;
use crate::api::middleware::error::ApiError;
use crate::api::models::{AddressChainQuery, PagedAddressQuery, ResultEnvelope};
use crate::app_state::AppState;
use crate::upstream::{Service, UpstreamRequest};

#[utoipa::path(
    get,
    path = "/txs",
    params(PagedAddressQuery),
    responses(
        (status = 200, description = "Native transactions of the address", body = ResultEnvelope),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Account"
)]
/// Returns native transactions of an address, wrapped as `{ result }`.
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PagedAddressQuery>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    let address = required("address", query.address)?;
    let chain = required("chain", query.chain)?;

    let request = UpstreamRequest::get(Service::Evm, [address])
        .param("chain", chain)
        .opt_param("limit", query.page_size)
        .opt_param("cursor", query.cursor);

    let result = state.api.call(request).await?;
    debug!("Transactions fetched");

    Ok(Json(ResultEnvelope { result }))
}

#[utoipa::path(
    get,
    path = "/balance",
    params(AddressChainQuery),
    responses(
        (status = 200, description = "Native balance as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Account"
)]
/// Returns the native balance of an address.
#[instrument(skip(state))]
pub async fn get_native_balance(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AddressChainQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = required("address", query.address)?;
    let chain = required("chain", query.chain)?;

    let request =
        UpstreamRequest::get(Service::Evm, [address.as_str(), "balance"]).param("chain", chain);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/gettokens",
    params(AddressChainQuery),
    responses(
        (status = 200, description = "ERC-20 balances as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Account"
)]
/// Returns ERC-20 balances of an address. The chain is optional.
#[instrument(skip(state))]
pub async fn get_token_balances(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AddressChainQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = required("address", query.address)?;

    let request = UpstreamRequest::get(Service::Evm, [address.as_str(), "erc20"])
        .opt_param("chain", query.chain);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/nfttransfers",
    params(PagedAddressQuery),
    responses(
        (status = 200, description = "NFT transfers as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Account"
)]
/// Returns NFT transfers involving an address, one page at a time.
#[instrument(skip(state))]
pub async fn get_nft_transfers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PagedAddressQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = required("address", query.address)?;
    let chain = required("chain", query.chain)?;

    let request = UpstreamRequest::get(Service::Evm, [address.as_str(), "nft", "transfers"])
        .param("chain", chain)
        .opt_param("limit", query.page_size)
        .opt_param("cursor", query.cursor);

    Ok(Json(state.api.call(request).await?))
}
