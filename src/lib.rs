//! # Web3 Data Proxy
//!
//! HTTP proxy that keeps a hosted Web3 data API key on the server side.
//!
//! Browser frontends call fixed routes on this service (`/txs`, `/balance`,
//! `/gettokens`, ...). Each route validates its query parameters, forwards
//! one or more calls to the Moralis EVM or Aptos API with the secret key
//! attached, and relays the JSON result.
//!
//! ## Architecture
//!
//! 1. **Config** ([`config`]) - Environment variable loading
//! 2. **Upstream** ([`upstream`]) - The [`DataApi`](upstream::DataApi) seam and its Moralis client
//! 3. **API** ([`api`]) - Routes, handlers, middleware, OpenAPI docs
//! 4. **CLI** ([`cli`]) - `serve` and one-shot lookups
//!
//! ## Quick Start
//!
//! ```bash
//! # .env
//! MORALIS_API_KEY=your_key
//!
//! cargo run --release -- serve --port 5001
//! ADDRESS=0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045
//! curl "http://localhost:5001/balance?address=$ADDRESS&chain=0x1"
//! ```
//!
//! ## Using as a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use web3_data_proxy::api::server::build_router;
//! use web3_data_proxy::{app_state::AppState, config::Config, upstream::MoralisClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let client = MoralisClient::new(&config)?;
//! let router = build_router(AppState::new(Arc::new(client), &config), 600, &[]);
//! # let _ = router;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`error::ProxyResult<T>`](error::ProxyResult).
//! The HTTP layer turns failures into responses in
//! [`api::middleware::error`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod upstream;
