//! # RPC Module
//!
//! The remote node is an injected collaborator. Flows only see [`ChainRpc`],
//! so they can run against devnet through [`SolanaRpc`] or against a
//! scripted fake in tests.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde_json::json;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_request::RpcRequest, rpc_response::Response,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, message::Message, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use tracing::debug;

use crate::error::{PrereqError, Result};

/// Operations the flows need from a Solana node.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_latest_blockhash(&self) -> Result<Hash>;

    /// Balance in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64>;

    /// Fee the node would charge for `message`.
    ///
    /// `Ok(None)` means the node answered but could not price the message,
    /// which usually means its blockhash has expired.
    async fn get_fee_for_message(&self, message: &Message) -> Result<Option<u64>>;

    /// Submit a signed transaction and wait for the configured commitment.
    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature>;

    async fn account_exists(&self, address: &Pubkey) -> Result<bool>;

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<Signature>;
}

/// [`ChainRpc`] over the nonblocking `solana-client` RPC client.
pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.into(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }
}

#[async_trait]
impl ChainRpc for SolanaRpc {
    async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| PrereqError::Rpc(format!("getLatestBlockhash failed: {e}")))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| PrereqError::Rpc(format!("getBalance failed for {address}: {e}")))
    }

    async fn get_fee_for_message(&self, message: &Message) -> Result<Option<u64>> {
        // The client helper folds a null result into an error; the raw request keeps them apart.
        let encoded = BASE64.encode(message.serialize());
        let response: Response<Option<u64>> = self
            .client
            .send(
                RpcRequest::GetFeeForMessage,
                json!([encoded, self.client.commitment()]),
            )
            .await
            .map_err(|e| PrereqError::Rpc(format!("getFeeForMessage failed: {e}")))?;

        debug!(
            "getFeeForMessage at slot {}: {:?}",
            response.context.slot, response.value
        );
        Ok(response.value)
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| PrereqError::TransactionRejected(e.to_string()))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(|e| PrereqError::Rpc(format!("getAccountInfo failed for {address}: {e}")))?;
        Ok(response.value.is_some())
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<Signature> {
        self.client
            .request_airdrop(address, lamports)
            .await
            .map_err(|e| PrereqError::Rpc(format!("requestAirdrop failed: {e}")))
    }
}
