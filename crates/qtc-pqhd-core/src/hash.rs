//! SHA3 hashing for the derivation pipeline.
//!
//! Two digest widths are used: SHA3-512 for the master entropy and SHA3-256
//! for the signature seed and the address digest.

use sha3::{Digest, Sha3_256, Sha3_512};

use crate::types::{
    AddressHash, MasterEntropy, SharedSecret, SignatureSeed, ADDRESS_HASH_LEN, MASTER_ENTROPY_LEN,
};

/// Domain tag mixed into the signature seed derivation.
pub const SIGNATURE_SEED_DOMAIN: &[u8] = b"QTC_PQHD_DILITHIUM";

/// SHA3-256 over the concatenation of `parts`.
pub fn sha3_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// SHA3-512 over the concatenation of `parts`.
pub fn sha3_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// `SHA3-256(shared_secret ‖ domain)`.
pub fn signature_seed_with_domain(shared_secret: &SharedSecret, domain: &[u8]) -> SignatureSeed {
    SignatureSeed::from_bytes(sha3_256(&[shared_secret.as_bytes(), domain]))
}

/// `SHA3-512(shared_secret ‖ signature_public_key)`.
pub fn master_entropy(shared_secret: &SharedSecret, signature_public_key: &[u8]) -> MasterEntropy {
    let digest: [u8; MASTER_ENTROPY_LEN] = sha3_512(&[shared_secret.as_bytes(), signature_public_key]);
    MasterEntropy(digest)
}

/// `SHA3-256(master_entropy)`.
pub fn address_hash(entropy: &MasterEntropy) -> AddressHash {
    let digest: [u8; ADDRESS_HASH_LEN] = sha3_256(&[entropy.as_bytes()]);
    AddressHash(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_empty_vector() {
        assert_eq!(
            hex::encode(sha3_256(&[])),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_parts_are_concatenated() {
        assert_eq!(sha3_256(&[b"ab", b"c"]), sha3_256(&[b"abc"]));
        assert_eq!(sha3_512(&[b"a", b"bc"]), sha3_512(&[b"abc"]));
    }

    #[test]
    fn test_signature_seed_vector() {
        let ss = SharedSecret::from_bytes([0x11; 32]);
        let seed = signature_seed_with_domain(&ss, SIGNATURE_SEED_DOMAIN);
        assert_eq!(
            seed.to_hex(),
            "67919181b5c3db1eff0eae87c4fff90a0b9127c644ca80d2bdd8c2b07898a19a"
        );
    }

    #[test]
    fn test_master_entropy_vector() {
        let ss = SharedSecret::from_bytes([0x11; 32]);
        let entropy = master_entropy(&ss, &[0x22; 1952]);
        assert_eq!(
            entropy.to_hex(),
            "700f542fedaf91c8dd7bb7b93fa3badd71a56270f8c3f7e554880a38b8be392d\
             ba5251e2a6b3e57f37f45cb3990e48bee2e3cd9a4e43d594edcc7d18a63ac65a"
        );
        assert_eq!(
            address_hash(&entropy).to_hex(),
            "2f342979c100f6f57b13e8fc8513c4860f60dbf3372ed32b9e287a7e43328496"
        );
    }

    #[test]
    fn test_digest_widths_independent_of_input() {
        let ss = SharedSecret::from_bytes([0; 32]);
        for len in [0usize, 1, 1952, 10_000] {
            let entropy = master_entropy(&ss, &vec![0x5a; len]);
            assert_eq!(entropy.as_bytes().len(), 64);
            assert_eq!(address_hash(&entropy).as_bytes().len(), 32);
        }
    }
}
