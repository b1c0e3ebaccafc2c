//! WalletStore trait: the abstract interface for record persistence.

use async_trait::async_trait;
use qtc_pqhd_core::WalletRecord;

use crate::error::{Result, StoreError};

/// Async interface for persisting the wallet record of a run.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Persist `record`, returning the exact document that was written.
    ///
    /// Either the whole document is stored or nothing is.
    async fn save(&self, record: &WalletRecord) -> Result<String>;

    /// Load the stored record, if any.
    async fn load(&self) -> Result<Option<WalletRecord>>;

    /// Whether a record is currently stored.
    async fn exists(&self) -> Result<bool>;

    /// Human-readable location of the stored document.
    fn location(&self) -> String;
}

/// Serialize a record the way every store writes it.
pub fn render_document(record: &WalletRecord) -> Result<String> {
    record
        .to_json_pretty()
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse a stored document.
pub fn parse_document(document: &str) -> Result<WalletRecord> {
    WalletRecord::from_json(document).map_err(|e| StoreError::Serialization(e.to_string()))
}
