//! # Transfer flow
//!
//! Step one sends a fixed amount. Step two empties whatever is left: it
//! prices a zero-lamport transfer with the same shape and blockhash as the
//! real one, then sends exactly `balance - fee`. Sending the whole balance
//! would be rejected because the fee comes out of the same account.

use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::{error, info, warn};

use crate::config::Cluster;
use crate::error::{PrereqError, Result};
use crate::explorer;
use crate::instructions;
use crate::rpc::ChainRpc;
use crate::stage::{FlowReport, StageOne, StageTwo};
use crate::transaction::{compile_message, sign_and_submit};

/// Amount that leaves exactly zero after the fee is charged, with the fee.
///
/// `fee` is `None` when the node could not price the message.
pub fn drain_amount(balance: u64, fee: Option<u64>) -> Result<(u64, u64)> {
    let fee = fee.ok_or(PrereqError::FeeUnavailable)?;
    let sent = balance
        .checked_sub(fee)
        .ok_or(PrereqError::InsufficientBalance { balance, fee })?;
    Ok((sent, fee))
}

/// What a drain sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReceipt {
    pub signature: Signature,
    pub balance: u64,
    pub fee: u64,
    pub sent: u64,
}

/// Send `lamports` from `source` to `destination`.
pub async fn send_sol<R>(
    rpc: &R,
    source: &Keypair,
    destination: &Pubkey,
    lamports: u64,
) -> Result<Signature>
where
    R: ChainRpc + ?Sized,
{
    let blockhash = rpc.get_latest_blockhash().await?;
    let ix = instructions::transfer(&source.pubkey(), destination, lamports);
    let message = compile_message(&[ix], &source.pubkey(), &blockhash);
    sign_and_submit(rpc, message, &[source]).await
}

/// Move the entire balance of `source` to `destination`, net of the fee.
pub async fn drain_wallet<R>(
    rpc: &R,
    source: &Keypair,
    destination: &Pubkey,
) -> Result<DrainReceipt>
where
    R: ChainRpc + ?Sized,
{
    let balance = rpc.get_balance(&source.pubkey()).await?;
    info!("Current balance: {} lamports", balance);

    let blockhash = rpc.get_latest_blockhash().await?;
    drain_with_blockhash(rpc, source, destination, balance, blockhash).await
}

/// Drain against a known `balance` and `blockhash`.
///
/// The same blockhash prices the dummy message and anchors the real one.
/// Nothing is submitted unless the fee is known and covered.
pub async fn drain_with_blockhash<R>(
    rpc: &R,
    source: &Keypair,
    destination: &Pubkey,
    balance: u64,
    blockhash: Hash,
) -> Result<DrainReceipt>
where
    R: ChainRpc + ?Sized,
{
    let payer = source.pubkey();

    // Fee depends on message size and signers, not on the amount.
    let dummy = instructions::transfer(&payer, destination, 0);
    let fee = rpc
        .get_fee_for_message(&compile_message(&[dummy], &payer, &blockhash))
        .await?;

    let (sent, fee) = drain_amount(balance, fee)?;
    info!("Transaction fee: {} lamports", fee);
    info!("Sending: {} lamports", sent);

    let ix = instructions::transfer(&payer, destination, sent);
    let message = compile_message(&[ix], &payer, &blockhash);
    let signature = sign_and_submit(rpc, message, &[source]).await?;

    Ok(DrainReceipt {
        signature,
        balance,
        fee,
        sent,
    })
}

/// Fixed transfer, then drain. A failed fixed transfer aborts the flow.
pub async fn run_transfer_flow<R>(
    rpc: &R,
    source: &Keypair,
    destination: &Pubkey,
    lamports: u64,
    cluster: Cluster,
) -> FlowReport<Signature>
where
    R: ChainRpc + ?Sized,
{
    info!("Step 1: Transferring {} lamports to {}...", lamports, destination);
    let first = match StageOne::from(send_sol(rpc, source, destination, lamports).await) {
        StageOne::Ok(signature) => {
            info!("✅ Success! {} lamports transferred.", lamports);
            info!("{}", explorer::transaction_url(&signature, cluster));
            signature
        }
        StageOne::Fatal(err) => {
            error!("Transfer failed: {}", err);
            return FlowReport::Aborted(err);
        }
    };

    info!("Step 2: Emptying remaining balance...");
    let second = StageTwo::from(
        drain_wallet(rpc, source, destination)
            .await
            .map(|receipt| receipt.signature),
    );
    match &second {
        StageTwo::Ok(signature) => {
            info!("✅ Success! Wallet emptied completely.");
            info!("{}", explorer::transaction_url(signature, cluster));
        }
        StageTwo::Reported(err) => warn!("Drain failed: {}", err),
    }

    FlowReport::Completed { first, second }
}
