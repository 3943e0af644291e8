//! # wallet
//!
//! Keypair generation, key format conversion, devnet airdrops and balance
//! lookups for the prerequisite wallets. Run `wallet` without arguments for
//! usage.

use std::process::ExitCode;

use anyhow::{Context, Result};
use prereq_runner::{
    Config, SolanaRpc, explorer, keys, telemetry,
    wallet::{self, USAGE, WalletCommand},
};
use solana_sdk::signature::{Keypair, Signer};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    telemetry::init();

    let command = match WalletCommand::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: WalletCommand) -> Result<()> {
    match command {
        WalletCommand::Keygen { path } => {
            let keypair = Keypair::new();
            info!("You've generated a new Solana wallet: {}", keypair.pubkey());
            match path {
                Some(path) => {
                    keys::save_keypair(&keypair, &path)?;
                    info!("Saved to {}", path.display());
                }
                None => {
                    info!("To save your wallet, copy and paste the following into a JSON file:");
                    println!("{}", keys::bytes_to_json(&keypair.to_bytes())?);
                }
            }
        }
        WalletCommand::Base58ToJson { encoded } => {
            let bytes = keys::base58_to_bytes(&encoded)?;
            info!("Your wallet file is:");
            println!("{}", keys::bytes_to_json(&bytes)?);
        }
        WalletCommand::JsonToBase58 { path } => {
            let keypair = keys::load_keypair(&path)?;
            info!("Secret key for {}:", keypair.pubkey());
            println!("{}", keys::bytes_to_base58(&keypair.to_bytes()));
        }
        WalletCommand::Airdrop { lamports } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let keypair = keys::load_keypair(&config.wallets.dev_wallet)
                .context("Couldn't find wallet file")?;
            let rpc = SolanaRpc::new(config.rpc.url.clone(), config.rpc.commitment);

            let lamports = lamports.unwrap_or(config.airdrop_lamports);
            let signature = wallet::airdrop(&rpc, &keypair.pubkey(), lamports).await?;
            info!("Success! Check out your TX here:");
            info!("{}", explorer::transaction_url(&signature, config.rpc.cluster));
        }
        WalletCommand::Balance { address } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let address = match address {
                Some(address) => address,
                None => keys::load_keypair(&config.wallets.dev_wallet)
                    .context("Couldn't find wallet file")?
                    .pubkey(),
            };
            let rpc = SolanaRpc::new(config.rpc.url.clone(), config.rpc.commitment);
            wallet::balance(&rpc, &address).await?;
        }
    }
    Ok(())
}
