//! Passkey Wallet Demo
//!
//! This binary:
//! 1. Connects a passkey smart wallet (one-click login, no seed phrases)
//! 2. Shows the provisioned wallet
//! 3. Submits a gasless transfer (fees sponsored in USDC)
//! 4. Prints the confirmation id
//!
//! The wallet capability is the in-memory mock provider; a real portal
//! integration implements the same `WalletProvider` trait.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use wallet_client::{
    ConnectionController, ConnectionState, FeeToken, MockWalletProvider, TransferController,
    TransferOptions, WalletConfig,
};

/// wallet provisioned by the mock provider
const DEMO_WALLET: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

#[derive(Parser)]
#[command(name = "passkey-demo")]
#[command(about = "Passkey wallet connection and gasless transfer demo")]
struct Cli {
    /// Recipient account address (base58)
    #[arg(long)]
    recipient: String,

    /// Amount in major units, e.g. 0.1
    #[arg(long)]
    amount: String,

    /// Cluster to target
    #[arg(long, default_value = "devnet")]
    cluster: String,

    /// Fee token: usdc (sponsored) or native
    #[arg(long, default_value = "usdc")]
    fee_token: String,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passkey_demo=info,wallet_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.cluster.as_str() {
        "devnet" => WalletConfig::devnet(),
        "mainnet" => WalletConfig::mainnet(),
        other => anyhow::bail!("unknown cluster: {other}"),
    };
    let fee_token = match cli.fee_token.as_str() {
        "usdc" => FeeToken::Usdc,
        "native" => FeeToken::Native,
        other => anyhow::bail!("unknown fee token: {other}"),
    };
    info!(rpc = %config.rpc_url, portal = %config.portal_url, "cluster selected");

    let provider = Arc::new(MockWalletProvider::new(DEMO_WALLET));

    let connection = ConnectionController::new(provider.clone());
    let wallet = match connection.connect().await? {
        ConnectionState::Connected { wallet } => wallet,
        other => anyhow::bail!("unexpected connection state: {other:?}"),
    };
    println!("connected: {} [{}]", wallet.abbreviated(), wallet.platform);
    println!("secured by WebAuthn passkey");

    let transfer = TransferController::new(
        provider,
        connection.subscribe(),
        TransferOptions {
            fee_token,
            ..TransferOptions::default()
        },
    );
    transfer.set_recipient(cli.recipient.as_str()).await;
    transfer.set_amount(cli.amount.as_str()).await;

    match transfer.submit().await {
        Ok(confirmation) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "success",
                        "confirmation": confirmation.as_str(),
                        "fee_token": fee_token.symbol(),
                    })
                );
            } else {
                println!("success: {confirmation}");
            }
        }
        Err(err) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "status": "error", "error": err.to_string() })
                );
            } else {
                println!("error: {err}");
            }
        }
    }

    connection.disconnect().await;
    Ok(())
}
