//! Command-line interface for the Web3 data proxy.
//!
//! # Commands
//!
//! - `serve`: Run the HTTP proxy
//! - `balance`: Look up one native balance and print it
//!
//! # Example
//!
//! ```bash
//! web3-data-proxy serve --port 5001
//! web3-data-proxy balance --address 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045 --chain 0x1
//! ```

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::{utils::format_ether, U256};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::WrapErr;
use serde_json::Value;
use tracing::info;

use crate::api::server::run_server;
use crate::app_state::AppState;
use crate::config::Config;
use crate::upstream::{DataApi, MoralisClient, Service, UpstreamRequest};

/// Web3 data proxy
#[derive(Parser, Debug)]
#[command(name = "web3-data-proxy")]
#[command(about = "HTTP proxy for hosted Web3 data queries", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP proxy
    Serve {
        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the native balance of an address
    Balance {
        /// Account address
        #[arg(short, long)]
        address: String,

        /// Chain name or hex chain id
        #[arg(short, long, default_value = "0x1")]
        chain: String,
    },
}

/// Parse CLI arguments and execute the appropriate command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the client cannot be
/// built, the server cannot start, or a one-shot lookup fails.
pub async fn run() -> eyre::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => run_serve(port).await,
        Commands::Balance { address, chain } => run_balance(address, chain).await,
    }
}

async fn run_serve(port: Option<u16>) -> eyre::Result<()> {
    let mut config = Config::from_env().wrap_err("invalid configuration")?;
    if let Some(port) = port {
        config = config.with_port(port);
    }

    // The client must exist before the listener accepts connections
    let client = MoralisClient::new(&config).wrap_err("failed to initialize data API client")?;
    let state = AppState::new(Arc::new(client), &config);

    info!(
        port = config.port(),
        webhook_verification = config.webhook_secret().is_some(),
        "Proxy configured"
    );

    run_server(state, &config).await
}

async fn run_balance(address: String, chain: String) -> eyre::Result<()> {
    let config = Config::from_env().wrap_err("invalid configuration")?;
    let client = MoralisClient::new(&config).wrap_err("failed to initialize data API client")?;

    let request = UpstreamRequest::get(Service::Evm, [address.as_str(), "balance"])
        .param("chain", chain.as_str());
    let response = client
        .call(request)
        .await
        .wrap_err_with(|| format!("balance lookup for {address} failed"))?;

    print_balance(&address, &chain, &response);
    Ok(())
}

fn print_balance(address: &str, chain: &str, response: &Value) {
    let Some(wei) = response.get("balance").and_then(Value::as_str) else {
        println!("{}", response.to_string().dimmed());
        return;
    };

    let formatted = format_balance(wei).unwrap_or_else(|| "?".to_string());

    println!(
        "{} {} on {} | {} wei | {} native",
        "💰".cyan(),
        address.yellow(),
        chain.blue(),
        wei.white().bold(),
        formatted.green().bold()
    );
}

/// Render a wei amount with 18 decimals. `None` if it is not an integer.
fn format_balance(wei: &str) -> Option<String> {
    U256::from_str(wei).ok().map(format_ether)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance() {
        assert_eq!(
            format_balance("1000000000000000000").as_deref(),
            Some("1.000000000000000000")
        );
        assert_eq!(format_balance("not-a-number"), None);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["web3-data-proxy", "serve"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["web3-data-proxy", "balance"]);
        assert!(cli.is_err(), "balance requires --address");
    }

    #[test]
    fn test_serve_command_with_port() {
        let cli = Cli::try_parse_from(["web3-data-proxy", "serve", "--port", "8080"]);

        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Serve { port: Some(8080) }
            })
        ));
    }

    #[test]
    fn test_balance_command_defaults_to_mainnet() {
        let cli = Cli::try_parse_from(["web3-data-proxy", "balance", "--address", "0xabc"]);

        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Balance { ref address, ref chain }
            }) if address == "0xabc" && chain == "0x1"
        ));
    }
}
