//! Golden vectors for the deterministic stages.
//!
//! Every implementation of the PQ-HD method must produce identical:
//! - signature seed
//! - master entropy
//! - address digest
//! - address
//!
//! for the same shared secret and signature public key.

use qtc_pqhd::core::derive::{derive_address, signature_seed};
use qtc_pqhd::core::{AddressParams, MlDsa65, SharedSecret, SignatureScheme, WalletDeriver};
use qtc_pqhd_testkit::vectors::{
    address_vectors, all_vectors, compute_address_vector, BECH32M_ZERO_ENTROPY_ADDRESS,
};
use qtc_pqhd_testkit::TestFixture;

#[test]
fn golden_vectors_through_pipeline_stages() {
    for vector in all_vectors() {
        let shared_secret = vector.shared_secret();

        assert_eq!(
            signature_seed(&shared_secret).to_hex(),
            vector.signature_seed,
            "{}: signature seed",
            vector.name
        );

        let derivation =
            derive_address(&shared_secret, &vector.public_key(), &AddressParams::pqhd()).unwrap();
        assert_eq!(
            derivation.master_entropy.to_hex(),
            vector.master_entropy,
            "{}: master entropy",
            vector.name
        );
        assert_eq!(
            derivation.address_hash.to_hex(),
            vector.address_hash,
            "{}: address hash",
            vector.name
        );
        assert_eq!(derivation.address.as_str(), vector.address, "{}", vector.name);
    }
}

#[test]
fn golden_address_vectors() {
    for vector in address_vectors() {
        assert_eq!(compute_address_vector(&vector), vector.address, "{}", vector.name);
    }
}

#[test]
fn golden_addresses_decode_to_their_digest_prefix() {
    let params = AddressParams::pqhd();
    for vector in all_vectors() {
        let program = params.decode(vector.address).unwrap();
        assert_eq!(program.to_hex(), vector.address_hash[..40]);
    }
}

#[test]
fn bech32m_encoding_is_not_a_qtc_address() {
    assert!(AddressParams::pqhd()
        .decode(BECH32M_ZERO_ENTROPY_ADDRESS)
        .is_err());
}

#[test]
fn signature_keys_follow_shared_secret() {
    let shared_secret = SharedSecret::from_bytes([0x11; 32]);
    let keypair = MlDsa65
        .keygen_from_seed(&signature_seed(&shared_secret))
        .unwrap();

    assert_eq!(keypair.public_key.len(), 1952);
    assert_eq!(keypair.secret_key.len(), 4032);

    let again = MlDsa65
        .keygen_from_seed(&signature_seed(&shared_secret))
        .unwrap();
    assert_eq!(keypair, again);
}

#[test]
fn fixed_fixture_gives_fixed_record() {
    let fixture = TestFixture::new(0x01, 1);
    let first = fixture.record().unwrap();
    let second = WalletDeriver::pqhd()
        .derive_wallet_from_seed(&fixture.seed, &mut fixture.rng())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}
