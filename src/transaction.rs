//! Message compilation, signing and submission.
//!
//! A signed transaction is single-use: if submission fails the caller has to
//! build a new message against a fresh blockhash.

use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tracing::debug;

use crate::error::{PrereqError, Result};
use crate::rpc::ChainRpc;

/// Largest serialized transaction the network accepts.
pub const MAX_TRANSACTION_SIZE: usize = PACKET_DATA_SIZE;

/// Compile instructions into a message paid by `payer` and bound to `blockhash`.
pub fn compile_message(instructions: &[Instruction], payer: &Pubkey, blockhash: &Hash) -> Message {
    Message::new_with_blockhash(instructions, Some(payer), blockhash)
}

/// Sign `message` with every required signer.
pub fn sign(message: Message, signers: &[&Keypair]) -> Result<Transaction> {
    let blockhash = message.recent_blockhash;
    let mut transaction = Transaction::new_unsigned(message);
    transaction
        .try_sign(signers, blockhash)
        .map_err(|e| PrereqError::Signing(e.to_string()))?;
    Ok(transaction)
}

/// Fail with `SizeLimitExceeded` unless the wire form fits in one packet.
pub fn ensure_within_size_limit(transaction: &Transaction) -> Result<usize> {
    let size = bincode::serialized_size(transaction)
        .map_err(|e| PrereqError::Serialization(e.to_string()))? as usize;
    if size > MAX_TRANSACTION_SIZE {
        return Err(PrereqError::SizeLimitExceeded {
            size,
            max: MAX_TRANSACTION_SIZE,
        });
    }
    Ok(size)
}

/// Sign, check size, then send and wait for confirmation.
pub async fn sign_and_submit<R>(
    rpc: &R,
    message: Message,
    signers: &[&Keypair],
) -> Result<Signature>
where
    R: ChainRpc + ?Sized,
{
    let transaction = sign(message, signers)?;
    let size = ensure_within_size_limit(&transaction)?;
    debug!(
        "Submitting transaction ({} bytes, blockhash {})",
        size, transaction.message.recent_blockhash
    );
    rpc.send_and_confirm_transaction(&transaction).await
}
