//! In-memory implementation of the WalletStore trait.
//!
//! This is primarily for testing. It keeps the rendered document exactly as
//! the file store would write it, with no persistence.

use std::sync::RwLock;

use async_trait::async_trait;
use qtc_pqhd_core::WalletRecord;

use crate::error::{Result, StoreError};
use crate::traits::{parse_document, render_document, WalletStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    document: RwLock<Option<String>>,
    overwrite: bool,
}

impl MemoryStore {
    /// Create a new empty in-memory store that accepts repeated saves.
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
            overwrite: true,
        }
    }

    /// Refuse a second save, like a [`FileStore`](crate::FileStore) without overwrite.
    pub fn write_once() -> Self {
        Self {
            document: RwLock::new(None),
            overwrite: false,
        }
    }

    /// The raw stored document.
    pub fn document(&self) -> Option<String> {
        self.document
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStore for MemoryStore {
    async fn save(&self, record: &WalletRecord) -> Result<String> {
        let document = render_document(record)?;

        let mut slot = self.document.write().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() && !self.overwrite {
            return Err(StoreError::AlreadyExists(self.location().into()));
        }
        *slot = Some(document.clone());

        Ok(document)
    }

    async fn load(&self) -> Result<Option<WalletRecord>> {
        self.document()
            .map(|document| parse_document(&document))
            .transpose()
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self
            .document
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtc_pqhd_core::{KemSeed, WalletDeriver};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn record(byte: u8) -> WalletRecord {
        WalletDeriver::pqhd()
            .derive_wallet_from_seed(
                &KemSeed::from_bytes([byte; 64]),
                &mut ChaCha20Rng::seed_from_u64(byte as u64),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(!store.exists().await.unwrap());
        assert!(store.load().await.unwrap().is_none());
        assert!(store.document().is_none());
    }

    #[tokio::test]
    async fn test_save_returns_stored_document() {
        let store = MemoryStore::new();
        let record = record(4);

        let document = store.save(&record).await.unwrap();
        assert_eq!(store.document().as_deref(), Some(document.as_str()));
        assert_eq!(document, record.to_json_pretty().unwrap());
        assert_eq!(store.load().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_write_once_refuses_second_save() {
        let store = MemoryStore::write_once();
        let first = record(1);
        store.save(&first).await.unwrap();

        assert!(matches!(
            store.save(&record(2)).await,
            Err(StoreError::AlreadyExists(_))
        ));
        assert_eq!(store.load().await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_default_replaces() {
        let store = MemoryStore::default();
        store.save(&record(1)).await.unwrap();
        let second = record(2);
        store.save(&second).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(second));
    }
}
