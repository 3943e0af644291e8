//! Error types shared by both flows.

use thiserror::Error;

/// Errors surfaced by the enrollment and transfer flows.
#[derive(Debug, Error)]
pub enum PrereqError {
    /// The fee estimator returned no value for the compiled message.
    #[error("unable to calculate transaction fee")]
    FeeUnavailable,

    #[error("insufficient balance. Balance: {balance}, Fee: {fee}")]
    InsufficientBalance { balance: u64, fee: u64 },

    /// Remote submission or confirmation failed.
    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("transaction too large: {size} bytes exceeds the {max} byte limit")]
    SizeLimitExceeded { size: usize, max: usize },

    #[error("rpc request failed: {0}")]
    Rpc(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("keypair error: {0}")]
    Keypair(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, PrereqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_carries_both_values() {
        let err = PrereqError::InsufficientBalance {
            balance: 3_000,
            fee: 5_000,
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance. Balance: 3000, Fee: 5000"
        );
    }

    #[test]
    fn size_limit_display() {
        let err = PrereqError::SizeLimitExceeded {
            size: 1300,
            max: 1232,
        };
        assert_eq!(
            err.to_string(),
            "transaction too large: 1300 bytes exceeds the 1232 byte limit"
        );
    }

    #[test]
    fn fee_unavailable_display() {
        assert_eq!(
            PrereqError::FeeUnavailable.to_string(),
            "unable to calculate transaction fee"
        );
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error =
            PrereqError::TransactionRejected("blockhash not found".into()).into();
        assert!(err.to_string().contains("blockhash not found"));
    }
}
