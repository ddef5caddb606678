//! CLI entry point for the Web3 data proxy.
//!
//! `main.rs` only sets up the async runtime and tracing. Everything else
//! happens in [`cli::run`](web3_data_proxy::cli::run).

use tracing::error;
use web3_data_proxy::{cli, observability};

#[tokio::main]
async fn main() {
    // Logging comes first so config errors are traced too.
    // RUST_LOG, LOG_JSON and LOG_FILE control the output.
    let _guard = match observability::init_tracing(&observability::LogSettings::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = ?e, "Application error");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
