//! # QTC PQ-HD Store
//!
//! Persistence for wallet records. Provides a trait-based interface with a
//! file implementation and an in-memory implementation for tests.
//!
//! ## Key Types
//!
//! - [`WalletStore`] - The async trait for record persistence
//! - [`FileStore`] - Writes the record document to a single JSON file
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use qtc_pqhd_store::{FileStore, WalletStore};
//!
//! async fn example() {
//!     let store = FileStore::new("qti3_pqhd_wallet.json");
//!     if let Some(record) = store.load().await.unwrap() {
//!         println!("{}", record.address());
//!     }
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **All or nothing**: a document is written to a sibling temporary file and
//!   renamed into place, so the target never holds a partial record.
//! - **No silent overwrite**: an existing wallet is kept unless the store was
//!   opened with overwriting enabled.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::{FileStore, DEFAULT_WALLET_FILE};
pub use memory::MemoryStore;
pub use traits::WalletStore;
