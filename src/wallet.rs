//! Wallet housekeeping commands behind the `wallet` binary.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

use crate::config::LAMPORTS_PER_SOL;
use crate::keys;
use crate::rpc::ChainRpc;

pub const USAGE: &str = "\
usage: wallet <command>

commands:
  keygen [path]             generate a keypair, optionally saving it to path
  base58-to-json <base58>   convert a base58 secret key to wallet file bytes
  json-to-base58 <path>     print a wallet file's secret key as base58
  airdrop [lamports]        request devnet lamports for DEV_WALLET
  balance [address]         show the balance of address (default DEV_WALLET)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletCommand {
    Keygen { path: Option<PathBuf> },
    Base58ToJson { encoded: String },
    JsonToBase58 { path: PathBuf },
    Airdrop { lamports: Option<u64> },
    Balance { address: Option<Pubkey> },
}

impl WalletCommand {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = args.next().ok_or_else(|| anyhow!("missing command"))?;
        let operand = args.next();
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'", extra);
        }

        match command.as_str() {
            "keygen" => Ok(WalletCommand::Keygen {
                path: operand.map(PathBuf::from),
            }),
            "base58-to-json" => Ok(WalletCommand::Base58ToJson {
                encoded: operand.ok_or_else(|| anyhow!("base58-to-json needs a base58 key"))?,
            }),
            "json-to-base58" => Ok(WalletCommand::JsonToBase58 {
                path: operand
                    .map(PathBuf::from)
                    .ok_or_else(|| anyhow!("json-to-base58 needs a wallet file path"))?,
            }),
            "airdrop" => Ok(WalletCommand::Airdrop {
                lamports: operand
                    .map(|raw| raw.replace('_', "").parse::<u64>())
                    .transpose()
                    .context("airdrop amount must be an integer number of lamports")?,
            }),
            "balance" => Ok(WalletCommand::Balance {
                address: operand
                    .map(|raw| keys::parse_address(&raw))
                    .transpose()?,
            }),
            other => bail!("unknown command '{}'", other),
        }
    }
}

/// Request an airdrop and return its signature.
pub async fn airdrop<R>(rpc: &R, address: &Pubkey, lamports: u64) -> Result<Signature>
where
    R: ChainRpc + ?Sized,
{
    info!(
        "Requesting {} lamports ({} SOL) for {}",
        lamports,
        lamports as f64 / LAMPORTS_PER_SOL as f64,
        address
    );
    Ok(rpc.request_airdrop(address, lamports).await?)
}

/// Log and return the balance of `address`.
pub async fn balance<R>(rpc: &R, address: &Pubkey) -> Result<u64>
where
    R: ChainRpc + ?Sized,
{
    let lamports = rpc.get_balance(address).await?;
    info!(
        "{}: {} lamports ({} SOL)",
        address,
        lamports,
        lamports as f64 / LAMPORTS_PER_SOL as f64
    );
    Ok(lamports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::fake::FakeRpc;

    fn parse(args: &[&str]) -> Result<WalletCommand> {
        WalletCommand::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse(&["keygen"]).unwrap(), WalletCommand::Keygen { path: None });
        assert_eq!(
            parse(&["keygen", "dev-wallet.json"]).unwrap(),
            WalletCommand::Keygen {
                path: Some(PathBuf::from("dev-wallet.json"))
            }
        );
        assert_eq!(
            parse(&["airdrop", "2_000_000_000"]).unwrap(),
            WalletCommand::Airdrop {
                lamports: Some(2_000_000_000)
            }
        );
        assert_eq!(
            parse(&["balance", "11111111111111111111111111111111"]).unwrap(),
            WalletCommand::Balance {
                address: Some(Pubkey::default())
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["mint"]).is_err());
        assert!(parse(&["base58-to-json"]).is_err());
        assert!(parse(&["json-to-base58"]).is_err());
        assert!(parse(&["airdrop", "lots"]).is_err());
        assert!(parse(&["balance", "nope"]).is_err());
        assert!(parse(&["keygen", "a.json", "b.json"]).is_err());
    }

    #[tokio::test]
    async fn airdrop_then_balance() {
        let rpc = FakeRpc::new();
        let address = Pubkey::new_unique();

        airdrop(&rpc, &address, 2 * LAMPORTS_PER_SOL).await.unwrap();
        assert_eq!(balance(&rpc, &address).await.unwrap(), 2 * LAMPORTS_PER_SOL);
    }
}
