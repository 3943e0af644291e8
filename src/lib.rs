//! # prereq-runner
//!
//! Drives a Solana RPC node through the Turbin3 prerequisite tasks.
//!
//! ## Flows
//! - `enroll`: derive the enrollment and collection-authority PDAs, send
//!   `initialize`, then send `submit_ts` (or `submit_rs`) with a fresh mint.
//! - `transfer`: send a fixed amount, then empty the wallet to the exact
//!   lamport, net of the network fee.
//!
//! Signing, encoding and transport come from `solana-sdk` and
//! `solana-client`. The node is reached through the [`rpc::ChainRpc`] trait so
//! the flows can be exercised against a scripted fake.
//!
//! ## Environment Setup
//! Configuration is read from the environment (and `.env`):
//! ```bash
//! SOLANA_RPC_URL=https://api.devnet.solana.com
//! TURBIN3_WALLET=Turbin3-wallet.json
//! GITHUB_HANDLE=your-handle
//! DESTINATION=<base58 address>
//! ```

pub mod config;
pub mod enroll;
pub mod error;
pub mod explorer;
pub mod instructions;
pub mod keys;
pub mod pda;
pub mod rpc;
pub mod stage;
pub mod telemetry;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use config::{Cluster, Config, ProgramIds, SubmitVariant};
pub use error::{PrereqError, Result};
pub use rpc::{ChainRpc, SolanaRpc};
pub use stage::{FlowReport, StageOne, StageTwo};
