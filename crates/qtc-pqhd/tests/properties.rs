//! Property tests for determinism, domain separation and address integrity.

use proptest::prelude::*;

use qtc_pqhd::core::derive::{derive_address, signature_seed};
use qtc_pqhd::core::hash::{self, SIGNATURE_SEED_DOMAIN};
use qtc_pqhd::core::{AddressParams, KemSeed, MlDsa65, SignatureScheme, WalletDeriver};
use qtc_pqhd_testkit::generators::{
    address_params, domain_tag, foreign_witness_version, kem_seed, master_entropy,
    shared_secret, signature_public_key, witness_program,
};
use qtc_pqhd_testkit::seeded_rng;

const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

proptest! {
    #[test]
    fn signature_seed_is_deterministic(ss in shared_secret()) {
        prop_assert_eq!(signature_seed(&ss), signature_seed(&ss));
    }

    #[test]
    fn signature_seed_is_domain_separated(ss in shared_secret(), domain in domain_tag(SIGNATURE_SEED_DOMAIN)) {
        prop_assert_ne!(
            hash::signature_seed_with_domain(&ss, SIGNATURE_SEED_DOMAIN),
            hash::signature_seed_with_domain(&ss, &domain)
        );
    }

    #[test]
    fn master_entropy_tracks_every_public_key_byte(
        ss in shared_secret(),
        pk in signature_public_key(1952),
        index in 0usize..1952,
    ) {
        let mut flipped = pk.clone();
        flipped[index] ^= 0x80;
        prop_assert_ne!(
            hash::master_entropy(&ss, &pk),
            hash::master_entropy(&ss, &flipped)
        );
    }

    #[test]
    fn address_stage_is_deterministic(ss in shared_secret(), pk in signature_public_key(1952)) {
        let params = AddressParams::pqhd();
        let a = derive_address(&ss, &pk, &params).unwrap();
        let b = derive_address(&ss, &pk, &params).unwrap();
        prop_assert_eq!(a.master_entropy, b.master_entropy);
        prop_assert_eq!(a.address, b.address);
    }

    #[test]
    fn address_roundtrips_under_its_params(program in witness_program(), params in address_params()) {
        let address = params.encode(&program).unwrap();
        prop_assert!(address.as_str().starts_with("qtc1"));
        prop_assert!(address.as_str().len() <= 90);
        prop_assert_eq!(params.decode(address.as_str()).unwrap(), program);
    }

    #[test]
    fn versions_do_not_cross(program in witness_program()) {
        let pqhd = AddressParams::pqhd();
        let primary = AddressParams::primary();

        let address = pqhd.encode(&program).unwrap();
        prop_assert!(primary.decode(address.as_str()).is_err());

        let address = primary.encode(&program).unwrap();
        prop_assert!(pqhd.decode(address.as_str()).is_err());
    }

    #[test]
    fn foreign_versions_are_rejected(program in witness_program(), version in foreign_witness_version()) {
        let params = AddressParams { witness_version: version, ..AddressParams::pqhd() };
        let address = params.encode(&program).unwrap();
        prop_assert!(AddressParams::pqhd().decode(address.as_str()).is_err());
    }

    #[test]
    fn single_character_substitution_is_detected(
        entropy in master_entropy(),
        position in 0usize..39,
        replacement in 0usize..32,
    ) {
        let params = AddressParams::pqhd();
        let address = params
            .encode(&hash::address_hash(&entropy).witness_program())
            .unwrap()
            .into_string();

        // Data part follows "qtc1".
        let index = 4 + position % (address.len() - 4);
        let original = address.as_bytes()[index] as char;
        let mut substitute = CHARSET.as_bytes()[replacement] as char;
        if substitute == original {
            substitute = CHARSET.as_bytes()[(replacement + 1) % 32] as char;
        }

        let mut mutated = address.clone();
        mutated.replace_range(index..index + 1, &substitute.to_string());
        prop_assert!(params.decode(&mutated).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn signature_keygen_is_deterministic(ss in shared_secret()) {
        let seed = signature_seed(&ss);
        let a = MlDsa65.keygen_from_seed(&seed).unwrap();
        let b = MlDsa65.keygen_from_seed(&seed).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn records_are_reproducible_for_any_seed(seed in kem_seed(), rng_seed in any::<u64>()) {
        let deriver = WalletDeriver::pqhd();
        let from_hex = KemSeed::from_hex(&hex::encode(seed.as_bytes())).unwrap();

        let a = deriver.derive_wallet_from_seed(&seed, &mut seeded_rng(rng_seed)).unwrap();
        let b = deriver.derive_wallet_from_seed(&from_hex, &mut seeded_rng(rng_seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
