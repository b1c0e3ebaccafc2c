//! Key encapsulation.
//!
//! The pipeline only needs keygen from a fixed seed, encapsulation against
//! its own public key, and decapsulation. [`Kem`] captures exactly that so
//! tests can substitute a broken implementation.

use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{EncodedSizeUser, KemCore, MlKem1024 as MlKem1024Core, B32};
use rand::{CryptoRng, RngCore};

use crate::error::{Result, WalletError};
use crate::types::{SharedSecret, KEM_SEED_LEN};

/// A key encapsulation mechanism with deterministic, seeded key generation.
pub trait Kem {
    /// Encapsulation (public) key.
    type PublicKey;
    /// Decapsulation (secret) key.
    type SecretKey;
    /// Ciphertext carrying the encapsulated secret.
    type Ciphertext;

    /// Algorithm name as written into wallet records.
    const ALGORITHM: &'static str;

    /// Generate a keypair from `seed`, which must be exactly the keygen seed size.
    fn keygen(&self, seed: &[u8]) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encapsulate a fresh shared secret to `public_key`.
    fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        public_key: &Self::PublicKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, SharedSecret)>;

    /// Recover the shared secret from `ciphertext`.
    fn decapsulate(
        &self,
        ciphertext: &Self::Ciphertext,
        secret_key: &Self::SecretKey,
    ) -> Result<SharedSecret>;

    /// Serialized public key.
    fn public_key_bytes(&self, public_key: &Self::PublicKey) -> Vec<u8>;

    /// Serialized secret key.
    fn secret_key_bytes(&self, secret_key: &Self::SecretKey) -> Vec<u8>;

    /// Structural check that serialized keys belong together.
    fn check_keypair_bytes(&self, public_key: &[u8], secret_key: &[u8]) -> Result<()>;
}

/// ML-KEM-1024 (Kyber1024), FIPS 203.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlKem1024;

impl MlKem1024 {
    /// Encoded encapsulation key size.
    pub const PUBLIC_KEY_SIZE: usize = 1568;
    /// Encoded decapsulation key size.
    pub const SECRET_KEY_SIZE: usize = 3168;
    /// Ciphertext size.
    pub const CIPHERTEXT_SIZE: usize = 1568;

    // The decapsulation key is dk_pke ‖ ek ‖ H(ek) ‖ z with a 1536-byte dk_pke.
    const EMBEDDED_PUBLIC_KEY_OFFSET: usize = 1536;
}

impl Kem for MlKem1024 {
    type PublicKey = <MlKem1024Core as KemCore>::EncapsulationKey;
    type SecretKey = <MlKem1024Core as KemCore>::DecapsulationKey;
    type Ciphertext = ml_kem::Ciphertext<MlKem1024Core>;

    const ALGORITHM: &'static str = "Kyber1024";

    fn keygen(&self, seed: &[u8]) -> Result<(Self::PublicKey, Self::SecretKey)> {
        if seed.len() != KEM_SEED_LEN {
            return Err(WalletError::SeedLength {
                scheme: Self::ALGORITHM,
                expected: KEM_SEED_LEN,
                got: seed.len(),
            });
        }

        let mut d = [0u8; 32];
        let mut z = [0u8; 32];
        d.copy_from_slice(&seed[..32]);
        z.copy_from_slice(&seed[32..]);

        let (dk, ek) = MlKem1024Core::generate_deterministic(&B32::from(d), &B32::from(z));
        Ok((ek, dk))
    }

    fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        public_key: &Self::PublicKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, SharedSecret)> {
        let (ct, key) = public_key
            .encapsulate(rng)
            .map_err(|_| WalletError::KemOperation("encapsulation failed".into()))?;
        let shared = SharedSecret::try_from(key.as_slice())
            .map_err(|_| WalletError::KemOperation("unexpected shared secret length".into()))?;
        Ok((ct, shared))
    }

    fn decapsulate(
        &self,
        ciphertext: &Self::Ciphertext,
        secret_key: &Self::SecretKey,
    ) -> Result<SharedSecret> {
        let key = secret_key
            .decapsulate(ciphertext)
            .map_err(|_| WalletError::KemOperation("decapsulation failed".into()))?;
        SharedSecret::try_from(key.as_slice())
            .map_err(|_| WalletError::KemOperation("unexpected shared secret length".into()))
    }

    fn public_key_bytes(&self, public_key: &Self::PublicKey) -> Vec<u8> {
        public_key.as_bytes().as_slice().to_vec()
    }

    fn secret_key_bytes(&self, secret_key: &Self::SecretKey) -> Vec<u8> {
        secret_key.as_bytes().as_slice().to_vec()
    }

    fn check_keypair_bytes(&self, public_key: &[u8], secret_key: &[u8]) -> Result<()> {
        if public_key.len() != Self::PUBLIC_KEY_SIZE {
            return Err(WalletError::Verification {
                field: "kyber_public_b64",
                reason: format!("expected {} bytes, got {}", Self::PUBLIC_KEY_SIZE, public_key.len()),
            });
        }
        if secret_key.len() != Self::SECRET_KEY_SIZE {
            return Err(WalletError::Verification {
                field: "kyber_private_b64",
                reason: format!("expected {} bytes, got {}", Self::SECRET_KEY_SIZE, secret_key.len()),
            });
        }

        let start = Self::EMBEDDED_PUBLIC_KEY_OFFSET;
        if &secret_key[start..start + Self::PUBLIC_KEY_SIZE] != public_key {
            return Err(WalletError::Verification {
                field: "kyber_private_b64",
                reason: "secret key does not embed the recorded public key".into(),
            });
        }
        Ok(())
    }
}
