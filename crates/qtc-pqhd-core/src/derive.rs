//! The PQ-HD derivation pipeline.
//!
//! Four strictly sequential stages:
//!
//! 1. seed & encapsulation: random seed, KEM keypair, self round trip, shared secret
//! 2. signature seed: `SHA3-256(shared_secret ‖ domain)` → signature keypair
//! 3. entropy & address: `SHA3-512(shared_secret ‖ sig_pk)` → `SHA3-256` → address
//! 4. record assembly (see [`crate::record`])
//!
//! Each stage is a free function over the previous stage's output, and every
//! failure is returned to the caller. Nothing here touches the filesystem or
//! the process.

use std::fmt;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::address::{Address, AddressParams};
use crate::error::{Result, WalletError};
use crate::hash::{self, SIGNATURE_SEED_DOMAIN};
use crate::kem::{Kem, MlKem1024};
use crate::record::WalletRecord;
use crate::signature::{MlDsa65, SignatureKeypair, SignatureScheme};
use crate::types::{AddressHash, KemSeed, MasterEntropy, SharedSecret, SignatureSeed, KEM_SEED_LEN};

/// Output of the seed & encapsulation stage.
pub struct EncapsulationOutput {
    pub kem_public_key: Vec<u8>,
    pub kem_secret_key: Zeroizing<Vec<u8>>,
    pub shared_secret: SharedSecret,
}

/// Output of the entropy & address stage.
pub struct AddressDerivation {
    /// `shared_secret ‖ signature_public_key`, the master entropy preimage.
    pub combined_input: Zeroizing<Vec<u8>>,
    pub master_entropy: MasterEntropy,
    pub address_hash: AddressHash,
    pub address: Address,
}

/// Every artifact of one pipeline run.
pub struct DerivedWallet {
    pub kem_public_key: Vec<u8>,
    pub kem_secret_key: Zeroizing<Vec<u8>>,
    pub shared_secret: SharedSecret,
    pub signature_seed: SignatureSeed,
    pub signature_keypair: SignatureKeypair,
    pub combined_input: Zeroizing<Vec<u8>>,
    pub master_entropy: MasterEntropy,
    pub address_hash: AddressHash,
    pub address: Address,
    pub witness_version: u8,
}

impl fmt::Debug for DerivedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedWallet")
            .field("address", &self.address)
            .field("witness_version", &self.witness_version)
            .field("master_entropy", &self.master_entropy)
            .finish_non_exhaustive()
    }
}

/// Draw a fresh KEM keygen seed from `rng`.
pub fn draw_seed<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KemSeed> {
    let mut bytes = Zeroizing::new([0u8; KEM_SEED_LEN]);
    rng.try_fill_bytes(&mut bytes[..])
        .map_err(|e| WalletError::RandomSource(e.to_string()))?;
    Ok(KemSeed::from_bytes(*bytes))
}

/// Stage 1: generate the KEM keypair and establish the shared secret.
///
/// The secret is encapsulated to our own public key and decapsulated again;
/// the two sides must agree or the KEM implementation is broken.
pub fn establish_shared_secret<K: Kem, R: RngCore + CryptoRng>(
    kem: &K,
    seed: &KemSeed,
    rng: &mut R,
) -> Result<EncapsulationOutput> {
    let (public_key, secret_key) = kem.keygen(seed.as_bytes())?;
    let (ciphertext, sent) = kem.encapsulate(&public_key, rng)?;
    let received = kem.decapsulate(&ciphertext, &secret_key)?;

    if sent != received {
        tracing::error!(algorithm = K::ALGORITHM, "KEM self round trip disagreed");
        return Err(WalletError::KemConsistency);
    }

    tracing::info!(algorithm = K::ALGORITHM, "KEM completed, shared secret established");

    Ok(EncapsulationOutput {
        kem_public_key: kem.public_key_bytes(&public_key),
        kem_secret_key: Zeroizing::new(kem.secret_key_bytes(&secret_key)),
        shared_secret: sent,
    })
}

/// The signature seed for `shared_secret` under the PQ-HD domain tag.
pub fn signature_seed(shared_secret: &SharedSecret) -> SignatureSeed {
    hash::signature_seed_with_domain(shared_secret, SIGNATURE_SEED_DOMAIN)
}

/// Stage 2: derive the signature seed and keypair from the shared secret.
pub fn derive_signature_keypair<S: SignatureScheme>(
    scheme: &S,
    shared_secret: &SharedSecret,
) -> Result<(SignatureSeed, SignatureKeypair)> {
    let seed = signature_seed(shared_secret);
    let keypair = scheme.keygen_from_seed(&seed)?;
    tracing::info!(algorithm = S::ALGORITHM, "deterministic signature keypair generated");
    Ok((seed, keypair))
}

/// Stage 3: master entropy, address digest and encoded address.
pub fn derive_address(
    shared_secret: &SharedSecret,
    signature_public_key: &[u8],
    params: &AddressParams,
) -> Result<AddressDerivation> {
    let mut combined_input =
        Zeroizing::new(Vec::with_capacity(shared_secret.as_bytes().len() + signature_public_key.len()));
    combined_input.extend_from_slice(shared_secret.as_bytes());
    combined_input.extend_from_slice(signature_public_key);

    let master_entropy = hash::master_entropy(shared_secret, signature_public_key);
    tracing::debug!(preview = %master_entropy.preview(), "master entropy derived");

    let address_hash = hash::address_hash(&master_entropy);
    let address = params.encode(&address_hash.witness_program())?;
    tracing::info!(%address, witness_version = params.witness_version, "address generated");

    Ok(AddressDerivation {
        combined_input,
        master_entropy,
        address_hash,
        address,
    })
}

/// Runs the whole pipeline for one KEM and one signature scheme.
#[derive(Debug, Clone)]
pub struct WalletDeriver<K: Kem = MlKem1024, S: SignatureScheme = MlDsa65> {
    kem: K,
    scheme: S,
    params: AddressParams,
}

impl WalletDeriver {
    /// The production deriver: ML-KEM-1024, ML-DSA-65, PQ-HD address parameters.
    pub fn pqhd() -> Self {
        Self::new(MlKem1024, MlDsa65, AddressParams::pqhd())
    }
}

impl Default for WalletDeriver {
    fn default() -> Self {
        Self::pqhd()
    }
}

impl<K: Kem, S: SignatureScheme> WalletDeriver<K, S> {
    /// Create a deriver from explicit collaborators.
    pub fn new(kem: K, scheme: S, params: AddressParams) -> Self {
        Self { kem, scheme, params }
    }

    /// The address parameters in use.
    pub fn params(&self) -> &AddressParams {
        &self.params
    }

    /// The KEM in use.
    pub fn kem(&self) -> &K {
        &self.kem
    }

    /// The signature scheme in use.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Algorithm line written into records.
    pub fn algorithm_label(&self) -> String {
        format!(
            "{}-KEM + {}-DSA (Deterministic PQ-HD)",
            K::ALGORITHM,
            S::ALGORITHM
        )
    }

    /// Run stages 1–3 from an explicit seed.
    ///
    /// `rng` only supplies the encapsulation randomness; with a fixed seed and
    /// a reproducible `rng` every artifact is reproducible.
    pub fn derive<R: RngCore + CryptoRng>(&self, seed: &KemSeed, rng: &mut R) -> Result<DerivedWallet> {
        let kem_out = establish_shared_secret(&self.kem, seed, rng)?;
        self.derive_from_shared_secret(kem_out)
    }

    /// Run stages 2–3 on top of an existing encapsulation output.
    pub fn derive_from_shared_secret(&self, kem_out: EncapsulationOutput) -> Result<DerivedWallet> {
        let (signature_seed, signature_keypair) =
            derive_signature_keypair(&self.scheme, &kem_out.shared_secret)?;

        let derivation = derive_address(
            &kem_out.shared_secret,
            &signature_keypair.public_key,
            &self.params,
        )?;

        Ok(DerivedWallet {
            kem_public_key: kem_out.kem_public_key,
            kem_secret_key: kem_out.kem_secret_key,
            shared_secret: kem_out.shared_secret,
            signature_seed,
            signature_keypair,
            combined_input: derivation.combined_input,
            master_entropy: derivation.master_entropy,
            address_hash: derivation.address_hash,
            address: derivation.address,
            witness_version: self.params.witness_version,
        })
    }

    /// Full pipeline from an explicit seed to an assembled record.
    pub fn derive_wallet_from_seed<R: RngCore + CryptoRng>(
        &self,
        seed: &KemSeed,
        rng: &mut R,
    ) -> Result<WalletRecord> {
        let derived = self.derive(seed, rng)?;
        Ok(WalletRecord::assemble(&derived, &self.algorithm_label()))
    }

    /// Full pipeline drawing the seed from `rng`.
    pub fn derive_wallet<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<WalletRecord> {
        let seed = draw_seed(rng)?;
        self.derive_wallet_from_seed(&seed, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::PQHD_WITNESS_VERSION;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_signature_seed_is_pure() {
        let ss = SharedSecret::from_bytes([0x5a; 32]);
        assert_eq!(signature_seed(&ss), signature_seed(&ss));
        assert_ne!(
            signature_seed(&ss),
            signature_seed(&SharedSecret::from_bytes([0x5b; 32]))
        );
    }

    #[test]
    fn test_signature_keypair_chain_is_deterministic() {
        let ss = SharedSecret::from_bytes([0x01; 32]);
        let (seed1, kp1) = derive_signature_keypair(&MlDsa65, &ss).unwrap();
        let (seed2, kp2) = derive_signature_keypair(&MlDsa65, &ss).unwrap();
        assert_eq!(seed1, seed2);
        assert_eq!(kp1, kp2);
    }

    #[test]
    fn test_derive_address_vector() {
        let ss = SharedSecret::from_bytes([0x11; 32]);
        let derivation = derive_address(&ss, &[0x22; 1952], &AddressParams::pqhd()).unwrap();

        assert_eq!(derivation.combined_input.len(), 32 + 1952);
        assert_eq!(&derivation.combined_input[..32], &[0x11; 32]);
        assert_eq!(
            derivation.address.as_str(),
            "qtc1z9u6zj7wpqrm027cnar7g2y7ysc8kpklnar8zcd"
        );
    }

    #[test]
    fn test_full_derivation_reproducible() {
        let deriver = WalletDeriver::pqhd();
        let seed = KemSeed::from_bytes([0x42; 64]);

        let w1 = deriver
            .derive(&seed, &mut ChaCha20Rng::seed_from_u64(1))
            .unwrap();
        let w2 = deriver
            .derive(&seed, &mut ChaCha20Rng::seed_from_u64(1))
            .unwrap();

        assert_eq!(w1.address, w2.address);
        assert_eq!(w1.master_entropy, w2.master_entropy);
        assert_eq!(w1.shared_secret, w2.shared_secret);
        assert_eq!(w1.signature_keypair, w2.signature_keypair);
        assert_eq!(w1.kem_public_key, w2.kem_public_key);
        assert_eq!(w1.witness_version, PQHD_WITNESS_VERSION);
    }

    #[test]
    fn test_encapsulation_randomness_changes_shared_secret_only() {
        let deriver = WalletDeriver::pqhd();
        let seed = KemSeed::from_bytes([0x42; 64]);

        let w1 = deriver
            .derive(&seed, &mut ChaCha20Rng::seed_from_u64(1))
            .unwrap();
        let w2 = deriver
            .derive(&seed, &mut ChaCha20Rng::seed_from_u64(2))
            .unwrap();

        // KEM keygen depends only on the seed.
        assert_eq!(w1.kem_public_key, w2.kem_public_key);
        assert_eq!(*w1.kem_secret_key, *w2.kem_secret_key);
        assert_ne!(w1.shared_secret, w2.shared_secret);
        assert_ne!(w1.address, w2.address);
    }

    #[test]
    fn test_draw_seed_uses_rng() {
        let s1 = draw_seed(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let s2 = draw_seed(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let s3 = draw_seed(&mut ChaCha20Rng::seed_from_u64(10)).unwrap();
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_algorithm_label() {
        assert_eq!(
            WalletDeriver::pqhd().algorithm_label(),
            "Kyber1024-KEM + Dilithium3-DSA (Deterministic PQ-HD)"
        );
    }
}
