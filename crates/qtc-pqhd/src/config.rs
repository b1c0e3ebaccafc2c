//! Wallet run configuration.

use std::path::PathBuf;

use qtc_pqhd_core::AddressParams;
use qtc_pqhd_store::{FileStore, DEFAULT_WALLET_FILE};

/// Configuration for a [`Wallet`](crate::Wallet).
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Where the record document is written.
    pub output: PathBuf,
    /// Replace an existing document at `output`.
    pub overwrite: bool,
    /// Write the document to the output stream after it is stored.
    pub emit_stdout: bool,
    /// Prefix and witness version addresses are encoded under.
    pub address: AddressParams,
}

impl WalletConfig {
    /// The file store this configuration describes.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.output.clone()).with_overwrite(self.overwrite)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_WALLET_FILE),
            overwrite: false,
            emit_stdout: true,
            address: AddressParams::pqhd(),
        }
    }
}
