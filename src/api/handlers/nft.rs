//! Batch NFT lookup.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::instrument;

use crate::api::extractors::ApiJson;
use crate::api::middleware::error::ApiError;
use crate::api::models::MultipleNftsRequest;
use crate::app_state::AppState;
use crate::error::ProxyError;
use crate::upstream::{Service, UpstreamRequest};

#[utoipa::path(
    post,
    path = "/get_nfts",
    request_body = MultipleNftsRequest,
    responses(
        (status = 200, description = "NFT metadata as returned by the data API"),
        (status = 400, description = "Malformed body, missing tokens or data API failure")
    ),
    tag = "NFT"
)]
/// Fetches metadata for a list of `{token_address, token_id}` pairs.
#[instrument(skip_all)]
pub async fn get_multiple_nfts(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<MultipleNftsRequest>,
) -> Result<Json<Value>, ApiError> {
    let tokens = body
        .tokens
        .ok_or_else(|| ProxyError::validation("body field `tokens` is required"))?;

    let request = UpstreamRequest::post(
        Service::Evm,
        ["nft", "getMultipleNFTs"],
        json!({ "tokens": tokens }),
    )
    .opt_param("chain", body.chain);

    Ok(Json(state.api.call(request).await?))
}
