//! # QTC PQ-HD Testkit
//!
//! Testing utilities for QTC PQ-HD wallets.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known hash and address outputs for fixed inputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Reproducible runs and collaborators that fail on purpose
//!
//! ## Golden Vectors
//!
//! ```rust
//! use qtc_pqhd_testkit::vectors::{all_vectors, compute_vector};
//!
//! for vector in all_vectors() {
//!     let (_, _, _, address) = compute_vector(&vector);
//!     assert_eq!(address, vector.address);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use qtc_pqhd_core::derive::signature_seed;
//! use qtc_pqhd_testkit::generators::shared_secret;
//!
//! proptest! {
//!     #[test]
//!     fn signature_seed_is_deterministic(ss in shared_secret()) {
//!         prop_assert_eq!(signature_seed(&ss), signature_seed(&ss));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use qtc_pqhd_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new(0x42, 7);
//! assert_eq!(fixture.record().unwrap(), fixture.record().unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    distinct_fixtures, seeded_rng, FailingRng, FailingStore, MismatchedKem, TestFixture,
};
pub use vectors::{all_vectors, address_vectors, verify_all_vectors, AddressVector, GoldenVector};
