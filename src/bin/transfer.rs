//! # transfer
//!
//! Sends `TRANSFER_LAMPORTS` from the dev wallet to `DESTINATION`, then
//! empties the dev wallet into the same address, leaving exactly zero.
//!
//! Exits non-zero when the fixed transfer fails. A failed drain is logged
//! and the process still exits cleanly.

use std::process::ExitCode;

use anyhow::{Context, Result};
use prereq_runner::{Config, SolanaRpc, keys, telemetry, transfer::run_transfer_flow};
use solana_sdk::signature::Signer;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    telemetry::init();
    info!("🏁 {} v{} (transfer)", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let destination = config.destination()?;

    let source = keys::load_keypair(&config.wallets.dev_wallet)
        .context("Couldn't load the dev wallet")?;
    info!("Dev wallet: {}", source.pubkey());

    let rpc = SolanaRpc::new(config.rpc.url.clone(), config.rpc.commitment);
    info!("🌐 RPC: {} ({})", rpc.url(), config.rpc.cluster);

    let report = run_transfer_flow(
        &rpc,
        &source,
        &destination,
        config.transfer.lamports,
        config.rpc.cluster,
    )
    .await;
    Ok(report.exit_code())
}
