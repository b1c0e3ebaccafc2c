//! Deterministic signature key generation.
//!
//! PQ signature schemes have no additive child-key derivation, so the PQ-HD
//! method chains seeds instead: the signature keypair is a pure function of a
//! 32-byte seed. [`SignatureScheme`] is the seam where that keygen plugs in.

use std::fmt;

use ml_dsa::{KeyGen, MlDsa65 as MlDsa65Params, B32};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, WalletError};
use crate::types::{SignatureSeed, SIGNATURE_SEED_LEN};

/// A serialized signature keypair.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SignatureKeypair {
    /// Encoded verifying key.
    pub public_key: Vec<u8>,
    /// Encoded signing key.
    pub secret_key: Vec<u8>,
}

impl fmt::Debug for SignatureKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = hex::encode(&self.public_key[..self.public_key.len().min(8)]);
        write!(f, "SignatureKeypair(pk={}...)", preview)
    }
}

/// A signature scheme whose key generation is deterministic in its seed.
pub trait SignatureScheme {
    /// Algorithm name as written into wallet records.
    const ALGORITHM: &'static str;

    /// Generate the keypair for `seed`. The same seed always yields the same keys.
    fn keygen(&self, seed: &[u8]) -> Result<SignatureKeypair>;

    /// Convenience wrapper over [`SignatureScheme::keygen`] for a typed seed.
    fn keygen_from_seed(&self, seed: &SignatureSeed) -> Result<SignatureKeypair> {
        self.keygen(seed.as_bytes())
    }
}

/// ML-DSA-65 (Dilithium3), FIPS 204.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlDsa65;

impl MlDsa65 {
    /// Encoded verifying key size.
    pub const PUBLIC_KEY_SIZE: usize = 1952;
    /// Encoded signing key size.
    pub const SECRET_KEY_SIZE: usize = 4032;
}

impl SignatureScheme for MlDsa65 {
    const ALGORITHM: &'static str = "Dilithium3";

    fn keygen(&self, seed: &[u8]) -> Result<SignatureKeypair> {
        let xi: [u8; SIGNATURE_SEED_LEN] =
            seed.try_into().map_err(|_| WalletError::SeedLength {
                scheme: Self::ALGORITHM,
                expected: SIGNATURE_SEED_LEN,
                got: seed.len(),
            })?;

        let keypair = MlDsa65Params::key_gen_internal(&B32::from(xi));
        Ok(SignatureKeypair {
            public_key: keypair.verifying_key().encode().as_slice().to_vec(),
            secret_key: keypair.signing_key().encode().as_slice().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keygen_is_deterministic() {
        let scheme = MlDsa65;
        let kp1 = scheme.keygen(&[0x42; 32]).unwrap();
        let kp2 = scheme.keygen(&[0x42; 32]).unwrap();
        assert_eq!(kp1, kp2);

        let kp3 = scheme.keygen(&[0x43; 32]).unwrap();
        assert_ne!(kp1.public_key, kp3.public_key);
    }

    #[test]
    fn test_key_sizes() {
        let kp = MlDsa65.keygen(&[7; 32]).unwrap();
        assert_eq!(kp.public_key.len(), MlDsa65::PUBLIC_KEY_SIZE);
        assert_eq!(kp.secret_key.len(), MlDsa65::SECRET_KEY_SIZE);
    }

    #[test]
    fn test_seed_length_rejected() {
        for len in [0usize, 31, 33, 64] {
            let err = MlDsa65.keygen(&vec![0; len]).unwrap_err();
            match err {
                WalletError::SeedLength { expected, got, .. } => {
                    assert_eq!(expected, 32);
                    assert_eq!(got, len);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_debug_hides_secret_key() {
        let kp = MlDsa65.keygen(&[9; 32]).unwrap();
        let debug = format!("{:?}", kp);
        assert!(debug.starts_with("SignatureKeypair(pk="));
        assert!(!debug.contains(&hex::encode(&kp.secret_key[..16])));
    }
}
