//! Test fixtures and fault injection.
//!
//! Common setup code for integration tests, plus collaborators that fail in
//! the specific ways the pipeline has to survive.

use async_trait::async_trait;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use qtc_pqhd_core::{
    Kem, KemSeed, MlKem1024, Result as WalletResult, SharedSecret, WalletDeriver, WalletRecord,
};
use qtc_pqhd_store::{Result as StoreResult, StoreError, WalletStore};

/// A fixed seed plus a seeded random source: a fully reproducible run.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub seed: KemSeed,
    pub rng_seed: u64,
}

impl TestFixture {
    /// Create a fixture from a seed fill byte and an RNG seed.
    pub fn new(fill: u8, rng_seed: u64) -> Self {
        Self {
            seed: KemSeed::from_bytes([fill; 64]),
            rng_seed,
        }
    }

    /// A fresh random source for this fixture; every call starts over.
    pub fn rng(&self) -> ChaCha20Rng {
        seeded_rng(self.rng_seed)
    }

    /// Run the production pipeline on this fixture.
    pub fn record(&self) -> WalletResult<WalletRecord> {
        WalletDeriver::pqhd().derive_wallet_from_seed(&self.seed, &mut self.rng())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new(0x42, 42)
    }
}

/// A reproducible random source.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Distinct fixtures for tests comparing several wallets.
pub fn distinct_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::new(i as u8, i as u64))
        .collect()
}

/// ML-KEM-1024 whose decapsulation returns a corrupted secret.
///
/// Models a broken KEM implementation: both sides of the self round trip
/// run, but they disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct MismatchedKem;

impl Kem for MismatchedKem {
    type PublicKey = <MlKem1024 as Kem>::PublicKey;
    type SecretKey = <MlKem1024 as Kem>::SecretKey;
    type Ciphertext = <MlKem1024 as Kem>::Ciphertext;

    const ALGORITHM: &'static str = MlKem1024::ALGORITHM;

    fn keygen(&self, seed: &[u8]) -> WalletResult<(Self::PublicKey, Self::SecretKey)> {
        MlKem1024.keygen(seed)
    }

    fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        public_key: &Self::PublicKey,
        rng: &mut R,
    ) -> WalletResult<(Self::Ciphertext, SharedSecret)> {
        MlKem1024.encapsulate(public_key, rng)
    }

    fn decapsulate(
        &self,
        ciphertext: &Self::Ciphertext,
        secret_key: &Self::SecretKey,
    ) -> WalletResult<SharedSecret> {
        let secret = MlKem1024.decapsulate(ciphertext, secret_key)?;
        let mut bytes = *secret.as_bytes();
        bytes[0] ^= 0x01;
        Ok(SharedSecret::from_bytes(bytes))
    }

    fn public_key_bytes(&self, public_key: &Self::PublicKey) -> Vec<u8> {
        MlKem1024.public_key_bytes(public_key)
    }

    fn secret_key_bytes(&self, secret_key: &Self::SecretKey) -> Vec<u8> {
        MlKem1024.secret_key_bytes(secret_key)
    }

    fn check_keypair_bytes(&self, public_key: &[u8], secret_key: &[u8]) -> WalletResult<()> {
        MlKem1024.check_keypair_bytes(public_key, secret_key)
    }
}

/// A random source that is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("FailingRng has no randomness")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("FailingRng has no randomness")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("FailingRng has no randomness")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy source unavailable",
        )))
    }
}

impl CryptoRng for FailingRng {}

/// A store whose writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

#[async_trait]
impl WalletStore for FailingStore {
    async fn save(&self, _record: &WalletRecord) -> StoreResult<String> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }

    async fn load(&self) -> StoreResult<Option<WalletRecord>> {
        Ok(None)
    }

    async fn exists(&self) -> StoreResult<bool> {
        Ok(false)
    }

    fn location(&self) -> String {
        "failing".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtc_pqhd_core::{AddressParams, MlDsa65, WalletError};

    #[test]
    fn test_fixture_is_reproducible() {
        let fixture = TestFixture::default();
        assert_eq!(fixture.record().unwrap(), fixture.record().unwrap());
    }

    #[test]
    fn test_distinct_fixtures_differ() {
        let records: Vec<_> = distinct_fixtures(3)
            .iter()
            .map(|f| f.record().unwrap())
            .collect();
        assert_ne!(records[0].address(), records[1].address());
        assert_ne!(records[1].address(), records[2].address());
    }

    #[test]
    fn test_mismatched_kem_is_detected() {
        let deriver = WalletDeriver::new(MismatchedKem, MlDsa65, AddressParams::pqhd());
        let fixture = TestFixture::default();
        let err = deriver
            .derive_wallet_from_seed(&fixture.seed, &mut fixture.rng())
            .unwrap_err();
        assert!(matches!(err, WalletError::KemConsistency));
    }

    #[test]
    fn test_failing_rng_is_random_source_error() {
        let err = WalletDeriver::pqhd()
            .derive_wallet(&mut FailingRng)
            .unwrap_err();
        assert!(matches!(err, WalletError::RandomSource(_)));
    }

    #[tokio::test]
    async fn test_failing_store() {
        let record = TestFixture::default().record().unwrap();
        assert!(matches!(
            FailingStore.save(&record).await,
            Err(StoreError::Io(_))
        ));
    }
}
