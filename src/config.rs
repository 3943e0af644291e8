//! Configuration module for environment variables and program addresses

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, system_program};

/// Turbin3 prerequisite program on devnet.
pub const PREREQ_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TRBZyQHB3m68FGeVsqTK39Wm4xejadjVhP5MAZaKWDM");

/// Metaplex Core program.
pub const MPL_CORE_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d");

/// Collection the enrollment asset is minted into.
pub const COLLECTION_ID: Pubkey =
    solana_sdk::pubkey!("5ebsp5RChCGK7ssRZMVMufgVZhd2kFbNaotcZ5UvytN2");

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// On-chain addresses the enrollment flow talks to.
///
/// Passed by value into the flows; nothing reads these from a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    pub prereq_program: Pubkey,
    pub mpl_core_program: Pubkey,
    pub collection: Pubkey,
    pub system_program: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            prereq_program: PREREQ_PROGRAM_ID,
            mpl_core_program: MPL_CORE_PROGRAM_ID,
            collection: COLLECTION_ID,
            system_program: system_program::id(),
        }
    }
}

/// Cluster name used for explorer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl FromStr for Cluster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet" | "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(anyhow!("unknown cluster '{}'", other)),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// Which prereq `submit_*` instruction the enrollment flow sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitVariant {
    #[default]
    Ts,
    Rs,
}

impl FromStr for SubmitVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ts" => Ok(SubmitVariant::Ts),
            "rs" => Ok(SubmitVariant::Rs),
            other => Err(anyhow!(
                "SUBMIT_VARIANT must be 'ts' or 'rs', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc: RpcConfig,
    pub wallets: WalletConfig,
    pub enrollment: EnrollmentConfig,
    pub transfer: TransferConfig,
    /// Lamports requested by `wallet airdrop` when no amount is given
    pub airdrop_lamports: u64,
    pub programs: ProgramIds,
}

#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub url: String,
    pub commitment: CommitmentConfig,
    pub cluster: Cluster,
}

#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Keypair that funds the transfer flow
    pub dev_wallet: String,
    /// Keypair that enrolls
    pub turbin3_wallet: String,
}

#[derive(Debug, Clone)]
pub struct EnrollmentConfig {
    pub github: Option<String>,
    pub variant: SubmitVariant,
}

#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub destination: Option<Pubkey>,
    /// Fixed amount sent by the first transfer step
    pub lamports: u64,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let commitment = match get("COMMITMENT") {
            Some(level) => parse_commitment(&level)?,
            None => CommitmentConfig::confirmed(),
        };

        let cluster = get("SOLANA_CLUSTER")
            .map(|c| c.parse::<Cluster>())
            .transpose()
            .context("Invalid SOLANA_CLUSTER")?
            .unwrap_or(Cluster::Devnet);

        let destination = get("DESTINATION")
            .map(|d| Pubkey::from_str(d.trim()))
            .transpose()
            .map_err(|e| anyhow!("DESTINATION is not a valid address: {}", e))?;

        Ok(Self {
            rpc: RpcConfig {
                url: get("SOLANA_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
                commitment,
                cluster,
            },
            wallets: WalletConfig {
                dev_wallet: get("DEV_WALLET").unwrap_or_else(|| "dev-wallet.json".to_string()),
                turbin3_wallet: get("TURBIN3_WALLET")
                    .unwrap_or_else(|| "Turbin3-wallet.json".to_string()),
            },
            enrollment: EnrollmentConfig {
                github: get("GITHUB_HANDLE").map(|g| g.trim().to_string()),
                variant: get("SUBMIT_VARIANT")
                    .map(|v| v.parse::<SubmitVariant>())
                    .transpose()?
                    .unwrap_or_default(),
            },
            transfer: TransferConfig {
                destination,
                lamports: parse_lamports(
                    get("TRANSFER_LAMPORTS"),
                    "TRANSFER_LAMPORTS",
                    LAMPORTS_PER_SOL,
                )?,
            },
            airdrop_lamports: parse_lamports(
                get("AIRDROP_LAMPORTS"),
                "AIRDROP_LAMPORTS",
                2 * LAMPORTS_PER_SOL,
            )?,
            programs: ProgramIds::default(),
        })
    }

    pub fn github(&self) -> Result<&str> {
        self.enrollment
            .github
            .as_deref()
            .ok_or_else(|| anyhow!("GITHUB_HANDLE environment variable is required"))
    }

    pub fn destination(&self) -> Result<Pubkey> {
        self.transfer
            .destination
            .ok_or_else(|| anyhow!("DESTINATION environment variable is required"))
    }
}

fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    match level.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(anyhow!("unknown commitment level '{}'", other)),
    }
}

/// Accepts `1000000000` as well as `1_000_000_000`.
fn parse_lamports(raw: Option<String>, key: &str, default: u64) -> Result<u64> {
    match raw {
        Some(value) => value
            .trim()
            .replace('_', "")
            .parse::<u64>()
            .with_context(|| format!("{} must be an integer lamport amount, got '{}'", key, value)),
        None => Ok(default),
    }
}
