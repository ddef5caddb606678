//! OpenAPI documentation for the REST API.

use utoipa::OpenApi;

use crate::api::handlers;

/// OpenAPI documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::account::get_transactions,
        handlers::account::get_native_balance,
        handlers::account::get_token_balances,
        handlers::account::get_nft_transfers,
        handlers::token::get_burns,
        handlers::token::get_mints,
        handlers::token::get_eth_token_price,
        handlers::token::get_dex_pair,
        handlers::token::get_date_blocks,
        handlers::token::get_token_prices,
        handlers::nft::get_multiple_nfts,
        handlers::aptos::get_account_transactions,
        handlers::aptos::get_coins_by_creator,
        handlers::webhook::receive_stream,
    ),
    components(schemas(
        crate::api::models::HealthResponse,
        crate::api::models::ErrorResponse,
        crate::api::models::ResultEnvelope,
        crate::api::models::BlockNumbersResponse,
        crate::api::models::TokenPricesResponse,
        crate::api::models::MultipleNftsRequest,
        crate::api::models::StreamPayload,
        crate::api::models::TransferEvent,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Account", description = "Address transactions and balances"),
        (name = "Token", description = "ERC-20 data"),
        (name = "NFT", description = "NFT metadata"),
        (name = "Aptos", description = "Aptos account data"),
        (name = "Webhook", description = "Stream notifications"),
    ),
    info(
        title = "Web3 Data Proxy API",
        version = "1.0.0",
        description = "Thin proxy over the Moralis EVM and Aptos data APIs",
    )
)]
pub struct ApiDoc;
