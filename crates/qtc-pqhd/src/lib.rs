//! # QTC PQ-HD
//!
//! Post-quantum wallet generation for QTC.
//!
//! ## Overview
//!
//! One run turns a fresh random seed into a complete wallet record:
//!
//! - **KEM**: an ML-KEM-1024 keypair and a shared secret from a self round trip
//! - **Seed chaining**: `SHA3-256(shared_secret ‖ "QTC_PQHD_DILITHIUM")` seeds
//!   a deterministic ML-DSA-65 keypair
//! - **Entropy**: `SHA3-512(shared_secret ‖ signature_public_key)`
//! - **Address**: Bech32 under `qtc`, witness version 2
//!
//! The record is written to a store and then emitted as a JSON document.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use qtc_pqhd::{Wallet, WalletConfig};
//!
//! async fn example() {
//!     let config = WalletConfig::default();
//!     let wallet = Wallet::new(config.file_store(), config);
//!
//!     let generated = wallet
//!         .run(&mut rand::rngs::OsRng, &mut std::io::stdout())
//!         .await
//!         .unwrap();
//!     println!("{}", generated.record.address());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `qtc_pqhd::core` - Derivation pipeline, record and address types
//! - `qtc_pqhd::store` - Record persistence

pub mod config;
pub mod error;
pub mod wallet;

// Re-export component crates
pub use qtc_pqhd_core as core;
pub use qtc_pqhd_store as store;

// Re-export main types for convenience
pub use config::WalletConfig;
pub use error::{PqhdError, Result};
pub use wallet::{GeneratedWallet, Wallet};

// Re-export commonly used core types
pub use qtc_pqhd_core::{
    Address, AddressParams, KemSeed, MlDsa65, MlKem1024, VerificationReport, WalletDeriver,
    WalletError, WalletRecord,
};
pub use qtc_pqhd_store::{FileStore, MemoryStore, StoreError, WalletStore};
