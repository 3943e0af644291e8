//! # enroll
//!
//! Enrolls the Turbin3 wallet in the prerequisite program: `initialize`
//! followed by `submit_ts` (or `submit_rs` with `SUBMIT_VARIANT=rs`).
//!
//! Exits non-zero when `initialize` fails. A failed submit is logged and the
//! process still exits cleanly, since the enrollment account is already in
//! place.

use std::process::ExitCode;

use anyhow::{Context, Result};
use prereq_runner::{
    Config, SolanaRpc,
    enroll::{EnrollmentParams, run_enrollment},
    keys, telemetry,
};
use solana_sdk::signature::Signer;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    telemetry::init();
    info!("🏁 {} v{} (enroll)", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

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
    let params = EnrollmentParams {
        programs: config.programs,
        github: config.github()?.to_string(),
        variant: config.enrollment.variant,
        cluster: config.rpc.cluster,
    };

    let user = keys::load_keypair(&config.wallets.turbin3_wallet)
        .context("Couldn't load the Turbin3 wallet")?;
    info!("Your Turbin3 wallet address: {}", user.pubkey());

    let rpc = SolanaRpc::new(config.rpc.url.clone(), config.rpc.commitment);
    info!("🌐 RPC: {} ({})", rpc.url(), config.rpc.cluster);

    let report = run_enrollment(&rpc, &user, &params).await;
    Ok(report.exit_code())
}
