//! ERC-20 token endpoints: burns, mints, prices, DEX pairs and block lookups.

use axum::{extract::State, Json};
use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::extractors::ApiQuery;
use crate::api::handlers::{list_param, required, single_param};
use crate::api::middleware::error::ApiError;
use crate::api::models::{BlockNumbersResponse, ChainQuery, DexPairQuery, TokenPricesResponse};
use crate::app_state::AppState;
use crate::error::ProxyError;
use crate::upstream::{Service, UpstreamRequest};

/// Chain used by `/ethtoken`.
const ETH_MAINNET: &str = "0x1";

#[utoipa::path(
    get,
    path = "/getburns",
    params(ChainQuery),
    responses(
        (status = 200, description = "ERC-20 burns as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Token"
)]
/// Returns recent ERC-20 burns on a chain.
#[instrument(skip(state))]
pub async fn get_burns(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChainQuery>,
) -> Result<Json<Value>, ApiError> {
    let chain = required("chain", query.chain)?;
    let request = UpstreamRequest::get(Service::Evm, ["erc20", "burns"]).param("chain", chain);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/getmints",
    params(ChainQuery),
    responses(
        (status = 200, description = "ERC-20 mints as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Token"
)]
/// Returns recent ERC-20 mints on a chain.
#[instrument(skip(state))]
pub async fn get_mints(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChainQuery>,
) -> Result<Json<Value>, ApiError> {
    let chain = required("chain", query.chain)?;
    let request = UpstreamRequest::get(Service::Evm, ["erc20", "mints"]).param("chain", chain);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/ethtoken",
    responses(
        (status = 200, description = "Price of the configured token on Ethereum mainnet"),
        (status = 400, description = "Data API failure")
    ),
    tag = "Token"
)]
/// Returns the price of the configured token. Takes no parameters.
#[instrument(skip(state))]
pub async fn get_eth_token_price(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let request = UpstreamRequest::get(Service::Evm, ["erc20", &*state.eth_token_address, "price"])
        .param("chain", ETH_MAINNET);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/getdexpair",
    params(DexPairQuery),
    responses(
        (status = 200, description = "Pair address and tokens as returned by the data API"),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Token"
)]
/// Resolves the pair contract of two tokens on a DEX.
#[instrument(skip(state))]
pub async fn get_dex_pair(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DexPairQuery>,
) -> Result<Json<Value>, ApiError> {
    let token0 = required("token0Address", query.token0_address)?;
    let token1 = required("token1Address", query.token1_address)?;
    let exchange = required("exchange", query.exchange)?;
    let chain = required("chain", query.chain)?;

    let path = [token0.as_str(), token1.as_str(), "pairAddress"];
    let request = UpstreamRequest::get(Service::Evm, path)
        .param("chain", chain)
        .param("exchange", exchange);

    Ok(Json(state.api.call(request).await?))
}

#[utoipa::path(
    get,
    path = "/getdateblock",
    params(
        ("dates[]" = Vec<String>, Query, description = "Dates (UNIX ms or ISO 8601), repeated"),
        ("chain" = Option<String>, Query, description = "Chain name or hex chain id")
    ),
    responses(
        (status = 200, description = "One block number per date", body = BlockNumbersResponse),
        (status = 400, description = "No dates given or data API failure")
    ),
    tag = "Token"
)]
/// Resolves the closest block for each date, in request order.
#[instrument(skip(state, params))]
pub async fn get_date_blocks(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<BlockNumbersResponse>, ApiError> {
    let dates = list_param(&params, "dates");
    if dates.is_empty() {
        return Err(ProxyError::validation("at least one `dates[]` value is required").into());
    }
    let chain = single_param(&params, "chain")?;
    debug!(count = dates.len(), "Resolving dates to blocks");

    let calls = dates.into_iter().map(|date| {
        let request = UpstreamRequest::get(Service::Evm, ["dateToBlock"])
            .opt_param("chain", chain.clone())
            .param("date", date);
        state.api.call(request)
    });

    let block_numbers = try_join_all(calls)
        .await?
        .into_iter()
        .map(|response| {
            response.get("block").cloned().ok_or_else(|| {
                ProxyError::upstream("dateToBlock response has no `block` field", Some(200), None)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(BlockNumbersResponse { block_numbers }))
}

#[utoipa::path(
    get,
    path = "/gettokenprice",
    params(
        ("address" = String, Query, description = "Token contract"),
        ("blockNumbers[]" = Vec<String>, Query, description = "Blocks to price at, repeated"),
        ("chain" = Option<String>, Query, description = "Chain name or hex chain id")
    ),
    responses(
        (status = 200, description = "One raw price per block", body = TokenPricesResponse),
        (status = 400, description = "Missing parameter or data API failure")
    ),
    tag = "Token"
)]
/// Prices a token at each requested block, in request order.
///
/// Without any block the current price is returned as a single entry.
#[instrument(skip(state, params))]
pub async fn get_token_prices(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<TokenPricesResponse>, ApiError> {
    let address = required("address", single_param(&params, "address")?)?;
    let chain = single_param(&params, "chain")?;
    let blocks = list_param(&params, "blockNumbers");
    debug!(%address, count = blocks.len(), "Pricing token at blocks");

    let price_request = |to_block: Option<String>| {
        UpstreamRequest::get(Service::Evm, ["erc20", address.as_str(), "price"])
            .opt_param("chain", chain.clone())
            .opt_param("to_block", to_block)
    };

    let requests: Vec<UpstreamRequest> = if blocks.is_empty() {
        vec![price_request(None)]
    } else {
        blocks.into_iter().map(|block| price_request(Some(block))).collect()
    };

    let calls = requests.into_iter().map(|request| state.api.call(request));
    let token_prices = try_join_all(calls).await?;

    Ok(Json(TokenPricesResponse { token_prices }))
}
