//! Ledger gateway client CLI.
//!
//! Discovery runs at most once per invocation; the resulting
//! `NetworkParameters` is passed by reference to the command that needs it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use ledger_client::config::{load_config, ClientConfig};
use ledger_client::discovery::{resolve_base_url, NetworkDiscovery, NetworkParameters};
use ledger_client::gateway::GatewayClient;
use ledger_client::observability::logging::{init_logging, LogFormat};
use ledger_client::poller::{ConfirmationPoller, PollResult};
use ledger_client::signer::Wallet;
use ledger_client::transaction::{
    from_minor_units, to_minor_units, UnsignedTransaction, DEFAULT_DECIMALS,
};

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Discover, sign, submit and confirm ledger transactions", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format (pretty or json). Overrides the config file.
    #[arg(long)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the gateway and print network parameters
    Discover,
    /// Print the ledger address of the configured private key
    Address,
    /// Create (fund) the account of the configured private key
    CreateAccount {
        /// Amount in whole units, e.g. "1.5"
        #[arg(long, default_value = "0")]
        amount: String,
        #[arg(long)]
        network_id: String,
        /// Wait for confirmation after submitting
        #[arg(long)]
        wait: bool,
    },
    /// Transfer native asset to another account
    Transfer {
        /// Recipient address (40 or 64 hex characters)
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        network_id: String,
        #[arg(long)]
        wait: bool,
    },
    /// Wait for a submitted transaction to reach a terminal state
    Status {
        tx_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };

    let format = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.observability.log_format);
    init_logging(&config.observability.log_level, LogFormat::from_str_lossy(format));

    match cli.command {
        Commands::Discover => {
            let params = discover(&config).await?;
            print_json(&parameters_json(&params)?)?;
        }
        Commands::Address => {
            let wallet = Wallet::from_env(&config.signer.private_key_env)?;
            print_json(&json!({ "address": wallet.ledger_address() }))?;
        }
        Commands::CreateAccount { amount, network_id, wait } => {
            let wallet = Wallet::from_env(&config.signer.private_key_env)?;
            let params = discover(&config).await?;
            let amount = to_minor_units(amount.as_str(), DEFAULT_DECIMALS)?;
            let tx = wallet.create_account_tx(amount, &network_id)?;
            submit(&config, &params, &wallet, tx, wait).await?;
        }
        Commands::Transfer { to, amount, network_id, wait } => {
            let wallet = Wallet::from_env(&config.signer.private_key_env)?;
            let params = discover(&config).await?;
            let amount = to_minor_units(amount.as_str(), DEFAULT_DECIMALS)?;
            let tx = wallet.transfer_tx(&to, amount, &network_id)?;
            submit(&config, &params, &wallet, tx, wait).await?;
        }
        Commands::Status { tx_id } => {
            let base_url = resolve_base_url(&config.discovery)?;
            let poller = ConfirmationPoller::new(&config.poller)?;
            let result = poller.wait(&base_url, &tx_id).await;
            print_json(&poll_json(&tx_id, &result))?;
        }
    }

    Ok(())
}

async fn discover(config: &ClientConfig) -> Result<NetworkParameters, Box<dyn std::error::Error>> {
    let discovery = NetworkDiscovery::new(config.discovery.clone())?;
    Ok(discovery.discover().await?)
}

async fn submit(
    config: &ClientConfig,
    params: &NetworkParameters,
    wallet: &Wallet,
    tx: UnsignedTransaction,
    wait: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let amount = from_minor_units(tx.amount(), DEFAULT_DECIMALS);
    let (signed, hash) = wallet.sign(tx).await?;

    let gateway = GatewayClient::from_parameters(params, &config.gateway)?;
    let submission = gateway.submit(&signed).await?;
    let tx_id = submission.tx_id_or(&hash);

    tracing::info!(tx_id = %tx_id, amount = %amount, "Transaction submitted");

    if !wait {
        print_json(&json!({ "txId": tx_id, "result": submission.result() }))?;
        return Ok(());
    }

    let poller = ConfirmationPoller::new(&config.poller)?;
    let result = poller.wait(params.base_url(), &tx_id).await;
    print_json(&poll_json(&tx_id, &result))?;

    match result {
        PollResult::Success { .. } => Ok(()),
        other => Err(format!("transaction {} not confirmed: {}", tx_id, other.label()).into()),
    }
}

fn parameters_json(params: &NetworkParameters) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "baseUrl": params.base_url(),
        "gatewayUrl": params.gateway_url(),
        "stabilityFactor": params.stability_factor(),
        "networkFeeUsd": params.network_fee_usd(),
        "networkFeeAsset": params.network_fee_asset(),
        "networkFeeMinorUnits": params.fee_minor_units()?.to_string(),
        "defaultTollUsd": params.default_toll_usd(),
        "defaultTollAsset": params.default_toll_asset(),
        "defaultTollMinorUnits": params.default_toll_minor_units()?.to_string(),
        "networkTollTaxRate": params.network_toll_tax_rate(),
    }))
}

fn poll_json(tx_id: &str, result: &PollResult) -> Value {
    match result {
        PollResult::Success { receipt } => {
            json!({ "txId": tx_id, "status": "success", "receipt": receipt })
        }
        PollResult::Failed { reason } => {
            json!({ "txId": tx_id, "status": "failed", "reason": reason })
        }
        PollResult::Timeout => json!({ "txId": tx_id, "status": "timeout" }),
    }
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
