//! # QTC PQ-HD Core
//!
//! Pure derivation pipeline for QTC PQ-HD wallets.
//!
//! This crate contains no file or process I/O. It turns one random seed into
//! an ML-KEM-1024 keypair, a shared secret, an ML-DSA-65 keypair chained
//! deterministically from that secret, a SHA3-512 master entropy and a
//! Bech32 address, and packages everything into a [`WalletRecord`].
//!
//! ## Key Types
//!
//! - [`WalletDeriver`] - Runs the pipeline for a given KEM and signature scheme
//! - [`Kem`] / [`SignatureScheme`] - Collaborator seams, mockable in tests
//! - [`AddressParams`] - Prefix and witness version an address is encoded under
//! - [`WalletRecord`] - The immutable output document
//!
//! ## Determinism
//!
//! Identical shared secrets give identical signature seeds, signature keys,
//! master entropy and addresses. See [`derive`].

pub mod address;
pub mod derive;
pub mod error;
pub mod hash;
pub mod kem;
pub mod record;
pub mod signature;
pub mod types;
pub mod verify;

pub use address::{
    Address, AddressParams, DecodedAddress, PQHD_WITNESS_VERSION, PRIMARY_WITNESS_VERSION,
    QTC_HRP,
};
pub use derive::{DerivedWallet, WalletDeriver};
pub use error::{Result, WalletError};
pub use kem::{Kem, MlKem1024};
pub use record::{WalletRecord, FORMAT_VERSION, METHOD};
pub use signature::{MlDsa65, SignatureKeypair, SignatureScheme};
pub use types::{KemSeed, MasterEntropy, SharedSecret, SignatureSeed, WitnessProgram};
pub use verify::{verify_record, VerificationReport};
