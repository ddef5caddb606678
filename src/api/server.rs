//! Axum server setup and routing.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use eyre::WrapErr;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{account, aptos, health, nft, token, webhook};
use crate::api::{docs::ApiDoc, middleware as api_middleware};
use crate::app_state::AppState;
use crate::config::Config;

/// Build the full application router.
///
/// Proxy routes live at the root (`/txs`, `/gettokens`, ...) because
/// existing frontends call them there.
pub fn build_router(state: AppState, rate_limit_rpm: u32, cors_origins: &[String]) -> Router {
    let limiter = api_middleware::rate_limit::create_rate_limiter(rate_limit_rpm);

    let proxy_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/txs", get(account::get_transactions))
        .route("/balance", get(account::get_native_balance))
        .route("/gettokens", get(account::get_token_balances))
        .route("/nfttransfers", get(account::get_nft_transfers))
        .route("/getburns", get(token::get_burns))
        .route("/getmints", get(token::get_mints))
        .route("/ethtoken", get(token::get_eth_token_price))
        .route("/getdexpair", get(token::get_dex_pair))
        .route("/getdateblock", get(token::get_date_blocks))
        .route("/gettokenprice", get(token::get_token_prices))
        .route("/get_nfts", post(nft::get_multiple_nfts))
        .route("/getaccounttransactions", get(aptos::get_account_transactions))
        .route("/getcoins", get(aptos::get_coins_by_creator))
        .route("/webhook", post(webhook::receive_stream));

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(cors_origins))
        .layer(middleware::from_fn(api_middleware::logging::log_requests))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            api_middleware::rate_limit::rate_limit(limiter.clone(), req, next)
        }));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(proxy_routes)
        .layer(middleware_stack)
        .with_state(state)
}

/// Run the Axum API server until ctrl-c.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn run_server(state: AppState, config: &Config) -> eyre::Result<()> {
    let app = build_router(state, config.rate_limit_rpm(), config.cors_origins());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, rate_limit_rpm = config.rate_limit_rpm(), "Starting API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("API server failed")?;

    info!("API server stopped");
    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
