//! API request and response models.
//!
//! Query structs keep every field as an optional string: values are handed
//! to the data API exactly as the caller wrote them, and absence is only an
//! error where the handler says so.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Address plus chain, e.g. `?address=0xabc&chain=0x1`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressChainQuery {
    /// Account address
    pub address: Option<String>,
    /// Chain name or hex chain id (e.g. `eth`, `0x1`)
    pub chain: Option<String>,
}

/// Address, chain and cursor pagination.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PagedAddressQuery {
    /// Account address
    pub address: Option<String>,
    /// Chain name or hex chain id
    pub chain: Option<String>,
    /// Page size, forwarded as `limit`
    pub page_size: Option<String>,
    /// Cursor returned by the previous page
    pub cursor: Option<String>,
}

/// Chain only, e.g. `?chain=0x89`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChainQuery {
    /// Chain name or hex chain id
    pub chain: Option<String>,
}

/// Token pair lookup on a DEX.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct DexPairQuery {
    /// First token of the pair
    pub token0_address: Option<String>,
    /// Second token of the pair
    pub token1_address: Option<String>,
    /// Exchange name (e.g. `uniswapv2`)
    pub exchange: Option<String>,
    /// Chain name or hex chain id
    pub chain: Option<String>,
}

/// Aptos account query with offset pagination.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AptosAccountQuery {
    /// Aptos account (or coin creator) address
    pub address: Option<String>,
    /// Page size, forwarded as `limit`
    pub page_size: Option<String>,
    /// Number of items to skip
    pub offset: Option<String>,
}

/// Body of `POST /get_nfts`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct MultipleNftsRequest {
    /// Chain name or hex chain id
    pub chain: Option<String>,
    /// `{token_address, token_id}` objects, forwarded unchanged
    #[schema(value_type = Option<Vec<Object>>)]
    pub tokens: Option<Vec<Value>>,
}

/// `/txs` wraps the upstream answer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultEnvelope {
    /// Raw data API response
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Block numbers resolved from dates, in request order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumbersResponse {
    /// One block per requested date
    #[schema(value_type = Vec<Object>)]
    pub block_numbers: Vec<Value>,
}

/// Token prices at several blocks, in request order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPricesResponse {
    /// Raw price responses, one per block
    #[schema(value_type = Vec<Object>)]
    pub token_prices: Vec<Value>,
}

/// A stream notification delivered to `/webhook`.
///
/// The provider sends an empty test notification when a stream is created,
/// so every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamPayload {
    /// Whether the block is confirmed
    pub confirmed: bool,
    /// Hex chain id (e.g. `0x1`)
    pub chain_id: String,
    /// Stream identifier
    pub stream_id: String,
    /// User tag of the stream
    pub tag: String,
    /// Block header info
    #[schema(value_type = Option<Object>)]
    pub block: Option<Value>,
    /// ERC-20 transfers in the block
    pub erc20_transfers: Vec<TransferEvent>,
    /// NFT transfers in the block
    pub nft_transfers: Vec<TransferEvent>,
}

impl StreamPayload {
    /// Number of transfers carried by this notification.
    #[must_use]
    pub fn transfer_count(&self) -> usize {
        self.erc20_transfers.len() + self.nft_transfers.len()
    }
}

/// One transfer inside a stream notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferEvent {
    /// Transaction hash
    pub transaction_hash: String,
    /// Token contract
    pub contract: String,
    /// Sender
    pub from: String,
    /// Recipient
    pub to: String,
    /// Raw amount (ERC-20)
    pub value: Option<String>,
    /// Token id (NFT)
    pub token_id: Option<String>,
    /// Token symbol, when the provider resolved it
    pub token_symbol: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Application version
    pub version: String,
    /// Process start time
    pub started_at: DateTime<Utc>,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Stream notifications accepted since start
    pub webhook_notifications: u64,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type
    pub error: String,
    /// Human-readable message
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stream_payload_accepts_empty_test_notification() {
        let payload: StreamPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.transfer_count(), 0);
        assert!(!payload.confirmed);
    }

    #[test]
    fn test_stream_payload_camel_case_fields() {
        let payload: StreamPayload = serde_json::from_value(json!({
            "confirmed": true,
            "chainId": "0x1",
            "streamId": "c28d9e2e",
            "tag": "whales",
            "erc20Transfers": [{
                "transactionHash": "0xfeed",
                "contract": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "from": "0xaaa",
                "to": "0xbbb",
                "value": "1000000",
                "tokenSymbol": "USDT",
                "logIndex": "12"
            }],
            "nftTransfers": [{ "tokenId": "42" }]
        }))
        .unwrap();

        assert_eq!(payload.chain_id, "0x1");
        assert_eq!(payload.transfer_count(), 2);
        assert_eq!(payload.erc20_transfers[0].value.as_deref(), Some("1000000"));
        assert_eq!(payload.erc20_transfers[0].token_symbol.as_deref(), Some("USDT"));
        assert_eq!(payload.nft_transfers[0].token_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_paged_query_uses_camel_case_names() {
        let query: PagedAddressQuery =
            serde_json::from_value(json!({ "address": "0xabc", "pageSize": "25" })).unwrap();
        assert_eq!(query.page_size.as_deref(), Some("25"));
        assert!(query.cursor.is_none());
    }
}
