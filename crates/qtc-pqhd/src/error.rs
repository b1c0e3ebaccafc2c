//! Error types for the wallet driver.

use qtc_pqhd_core::WalletError;
use qtc_pqhd_store::StoreError;
use thiserror::Error;

/// Errors that can occur while generating, persisting or checking a wallet.
#[derive(Debug, Error)]
pub enum PqhdError {
    /// Derivation or record check failed.
    #[error("wallet error ({})", .0.stage())]
    Wallet(#[from] WalletError),

    /// The record could not be written or read.
    #[error("persistence error")]
    Persistence(#[from] StoreError),

    /// The record was stored but could not be emitted.
    #[error("output error")]
    Output(#[source] std::io::Error),
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, PqhdError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cause_appears_once_in_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = PqhdError::from(StoreError::from(io));

        let rendered = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(rendered, "persistence error: I/O error: no such directory");
    }

    #[test]
    fn test_wallet_error_names_stage() {
        let err = PqhdError::from(WalletError::KemConsistency);
        assert_eq!(err.to_string(), "wallet error (seed & encapsulation)");
        assert!(err.source().is_some());
    }
}
