//! Keypair files and key encodings.
//!
//! Wallet files use the Solana CLI format: a JSON array of the 64 secret key
//! bytes. Browser wallets export the same bytes as one base58 string.

use std::path::Path;
use std::str::FromStr;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, read_keypair_file, write_keypair_file},
};

use crate::error::{PrereqError, Result};

/// Load a keypair from a JSON wallet file.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<Keypair> {
    let path = path.as_ref();
    read_keypair_file(path).map_err(|e| {
        PrereqError::Keypair(format!("couldn't read wallet file {}: {e}", path.display()))
    })
}

/// Write `keypair` to `path` in the JSON byte-array format.
pub fn save_keypair(keypair: &Keypair, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_keypair_file(keypair, path)
        .map(|_| ())
        .map_err(|e| {
            PrereqError::Keypair(format!("couldn't write wallet file {}: {e}", path.display()))
        })
}

/// Rebuild a keypair from its 64 raw secret bytes.
pub fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair> {
    if bytes.len() != 64 {
        return Err(PrereqError::Keypair(format!(
            "expected 64 secret key bytes, got {}",
            bytes.len()
        )));
    }
    Keypair::try_from(bytes).map_err(|e| PrereqError::Keypair(e.to_string()))
}

/// Decode a base58 secret key (as exported by Phantom and friends) into raw bytes.
pub fn base58_to_bytes(encoded: &str) -> Result<Vec<u8>> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| PrereqError::Keypair(format!("invalid base58: {e}")))?;
    // Reject anything that is not a usable keypair.
    keypair_from_bytes(&bytes)?;
    Ok(bytes)
}

pub fn bytes_to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Render secret key bytes the way wallet files store them.
pub fn bytes_to_json(bytes: &[u8]) -> Result<String> {
    serde_json::to_string(bytes).map_err(|e| PrereqError::Serialization(e.to_string()))
}

/// Parse a JSON byte array such as `[34, 46, 55, ...]`.
pub fn json_to_bytes(json: &str) -> Result<Vec<u8>> {
    serde_json::from_str::<Vec<u8>>(json.trim())
        .map_err(|e| PrereqError::Serialization(format!("expected a JSON byte array: {e}")))
}

pub fn parse_address(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address.trim())
        .map_err(|e| PrereqError::InvalidAddress(format!("{address}: {e}")))
}
