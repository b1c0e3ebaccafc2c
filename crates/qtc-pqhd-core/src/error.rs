//! Error types for the PQ-HD derivation pipeline.

use thiserror::Error;

/// Errors that abort a wallet derivation or a record check.
///
/// None of these are recovered locally. A failed derivation is discarded in
/// full and the only recovery is a fresh run from a new seed.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("random source failure: {0}")]
    RandomSource(String),

    #[error("KEM round trip produced mismatched shared secrets")]
    KemConsistency,

    #[error("KEM operation failed: {0}")]
    KemOperation(String),

    #[error("{scheme} rejected seed of {got} bytes (expected {expected})")]
    SeedLength {
        scheme: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("address encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("record verification failed on {field}: {reason}")]
    Verification { field: &'static str, reason: String },
}

impl WalletError {
    /// The pipeline stage (or check) the error belongs to, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            WalletError::RandomSource(_)
            | WalletError::KemConsistency
            | WalletError::KemOperation(_) => "seed & encapsulation",
            WalletError::SeedLength { .. } => "signature seed",
            WalletError::Encoding(_) => "entropy & address",
            WalletError::Decoding(_) | WalletError::Verification { .. } => "record check",
        }
    }
}

/// Result type for derivation operations.
pub type Result<T> = std::result::Result<T, WalletError>;
