//! File implementation of the WalletStore trait.
//!
//! The record is one pretty-printed JSON document at a fixed path. Writes go
//! through an owner-only temporary file in the same directory, which is then
//! renamed into place, or hard-linked when an existing wallet must not be
//! replaced.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use qtc_pqhd_core::WalletRecord;
use tokio::io::AsyncWriteExt;

use crate::error::{Result, StoreError};
use crate::traits::{parse_document, render_document, WalletStore};

/// Documented name of the wallet file.
pub const DEFAULT_WALLET_FILE: &str = "qti3_pqhd_wallet.json";

/// File-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    overwrite: bool,
}

impl FileStore {
    /// Store at `path`, refusing to replace an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: false,
        }
    }

    /// Allow or forbid replacing an existing wallet file.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Path of the wallet document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_WALLET_FILE));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_temp(&self, temp: &Path, document: &str) -> Result<()> {
        if let Err(e) = tokio::fs::remove_file(temp).await {
            if e.kind() != ErrorKind::NotFound {
                return Err(e.into());
            }
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        // The document holds secret keys.
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(temp).await?;
        file.write_all(document.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Move the finished temporary file to the wallet path.
    ///
    /// Without overwrite the move is a hard link, which fails if the target
    /// appeared after the existence check.
    async fn publish(&self, temp: &Path) -> Result<()> {
        if self.overwrite {
            return Ok(tokio::fs::rename(temp, &self.path).await?);
        }

        match tokio::fs::hard_link(temp, &self.path).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(temp).await {
                    tracing::warn!(path = %temp.display(), error = %e, "could not remove temporary wallet file");
                }
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_WALLET_FILE)
    }
}

#[async_trait]
impl WalletStore for FileStore {
    async fn save(&self, record: &WalletRecord) -> Result<String> {
        if !self.overwrite && self.exists().await? {
            return Err(StoreError::AlreadyExists(self.path.clone()));
        }

        let document = render_document(record)?;
        let temp = self.temp_path();

        let written = match self.write_temp(&temp, &document).await {
            Ok(()) => self.publish(&temp).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %temp.display(), error = %cleanup, "could not remove temporary wallet file");
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), bytes = document.len(), "wallet document written");
        Ok(document)
    }

    async fn load(&self) -> Result<Option<WalletRecord>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(document) => parse_document(&document).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self) -> Result<bool> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
