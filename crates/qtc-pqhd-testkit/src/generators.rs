//! Proptest generators for property-based testing.

use proptest::prelude::*;

use qtc_pqhd_core::{
    AddressParams, KemSeed, MasterEntropy, SharedSecret, WitnessProgram, PQHD_WITNESS_VERSION,
    PRIMARY_WITNESS_VERSION,
};

/// Generate a random KEM keygen seed.
pub fn kem_seed() -> impl Strategy<Value = KemSeed> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|v| {
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&v);
        KemSeed::from_bytes(bytes)
    })
}

/// Generate a random shared secret.
pub fn shared_secret() -> impl Strategy<Value = SharedSecret> {
    any::<[u8; 32]>().prop_map(SharedSecret::from_bytes)
}

/// Generate a random master entropy value.
pub fn master_entropy() -> impl Strategy<Value = MasterEntropy> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|v| {
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&v);
        MasterEntropy(bytes)
    })
}

/// Generate a random witness program.
pub fn witness_program() -> impl Strategy<Value = WitnessProgram> {
    any::<[u8; 20]>().prop_map(WitnessProgram)
}

/// Generate a signature public key of the given size.
pub fn signature_public_key(len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), len)
}

/// Generate a domain tag other than `exclude`.
pub fn domain_tag(exclude: &'static [u8]) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=32).prop_filter("distinct domain", move |d| d != exclude)
}

/// Either of the two known address parameter sets.
pub fn address_params() -> impl Strategy<Value = AddressParams> {
    prop_oneof![
        Just(AddressParams::pqhd()),
        Just(AddressParams::primary()),
    ]
}

/// A witness version that belongs to no known method.
pub fn foreign_witness_version() -> impl Strategy<Value = u8> {
    (0u8..=16).prop_filter("unassigned version", |v| {
        *v != PQHD_WITNESS_VERSION && *v != PRIMARY_WITNESS_VERSION
    })
}
