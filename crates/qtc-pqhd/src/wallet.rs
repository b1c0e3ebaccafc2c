//! The Wallet: one derivation run from random source to emitted document.
//!
//! The derivation itself is pure and lives in `qtc_pqhd_core`. The wallet
//! adds the two side effects a run has: persisting the record through a
//! [`WalletStore`], then emitting the same document to an output stream.
//! Emission only happens after a successful write, so a failed run leaves
//! nothing on the output stream.

use std::io::Write;
use std::sync::Arc;

use rand::{CryptoRng, RngCore};

use qtc_pqhd_core::{
    verify_record, AddressParams, DecodedAddress, Kem, KemSeed, MlDsa65, MlKem1024,
    SignatureScheme, VerificationReport, WalletDeriver, WalletError, WalletRecord, WitnessProgram,
    PQHD_WITNESS_VERSION, PRIMARY_WITNESS_VERSION,
};
use qtc_pqhd_store::{StoreError, WalletStore};

use crate::config::WalletConfig;
use crate::error::{PqhdError, Result};

/// A record that has been stored, with the exact document that was written.
#[derive(Debug, Clone)]
pub struct GeneratedWallet {
    pub record: WalletRecord,
    pub document: String,
}

/// Drives derivation, persistence and emission.
pub struct Wallet<St: WalletStore, K: Kem = MlKem1024, S: SignatureScheme = MlDsa65> {
    deriver: WalletDeriver<K, S>,
    store: Arc<St>,
    config: WalletConfig,
}

impl<St: WalletStore> Wallet<St> {
    /// Create a wallet using the production algorithms.
    pub fn new(store: St, config: WalletConfig) -> Self {
        let deriver = WalletDeriver::new(MlKem1024, MlDsa65, config.address.clone());
        Self::with_deriver(deriver, store, config)
    }
}

impl<St: WalletStore, K: Kem, S: SignatureScheme> Wallet<St, K, S> {
    /// Create a wallet around an explicit deriver.
    pub fn with_deriver(deriver: WalletDeriver<K, S>, store: St, config: WalletConfig) -> Self {
        Self {
            deriver,
            store: Arc::new(store),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Get the deriver.
    pub fn deriver(&self) -> &WalletDeriver<K, S> {
        &self.deriver
    }

    /// Derive a wallet, drawing the seed from `rng`, and store it.
    pub async fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<GeneratedWallet> {
        let record = self.deriver.derive_wallet(rng).map_err(|e| {
            tracing::error!(stage = e.stage(), error = %e, "wallet derivation failed");
            PqhdError::from(e)
        })?;
        self.persist(record).await
    }

    /// Derive a wallet from an explicit seed and store it.
    pub async fn generate_from_seed<R: RngCore + CryptoRng>(
        &self,
        seed: &KemSeed,
        rng: &mut R,
    ) -> Result<GeneratedWallet> {
        let record = self.deriver.derive_wallet_from_seed(seed, rng).map_err(|e| {
            tracing::error!(stage = e.stage(), error = %e, "wallet derivation failed");
            PqhdError::from(e)
        })?;
        self.persist(record).await
    }

    /// Generate, store, then write the document to `out` if configured to.
    pub async fn run<R, W>(&self, rng: &mut R, out: &mut W) -> Result<GeneratedWallet>
    where
        R: RngCore + CryptoRng,
        W: Write,
    {
        let generated = self.generate(rng).await?;

        if self.config.emit_stdout {
            writeln!(out, "{}", generated.document).map_err(PqhdError::Output)?;
            out.flush().map_err(PqhdError::Output)?;
        }

        Ok(generated)
    }

    async fn persist(&self, record: WalletRecord) -> Result<GeneratedWallet> {
        let document = self.store.save(&record).await.map_err(|e| {
            tracing::error!(location = %self.store.location(), error = %e, "wallet record not saved");
            PqhdError::from(e)
        })?;

        tracing::info!(
            location = %self.store.location(),
            address = record.address(),
            "wallet record saved"
        );

        Ok(GeneratedWallet { record, document })
    }

    /// Load the stored record and re-derive everything derivable from it.
    pub async fn verify(&self) -> Result<VerificationReport> {
        let record = self
            .store
            .load()
            .await?
            .ok_or_else(|| StoreError::NotFound(self.store.location()))?;

        let report = verify_record(&self.deriver, &record)?;
        tracing::info!(address = %report.address, "wallet record is consistent");
        Ok(report)
    }

    /// Decode an address under the configured prefix.
    ///
    /// Either known witness version is accepted; anything else is rejected.
    pub fn inspect_address(&self, address: &str) -> Result<(u8, WitnessProgram)> {
        let decoded = DecodedAddress::parse(address)?;

        if decoded.witness_version != PQHD_WITNESS_VERSION
            && decoded.witness_version != PRIMARY_WITNESS_VERSION
        {
            return Err(WalletError::Decoding(format!(
                "unknown witness version {}",
                decoded.witness_version
            ))
            .into());
        }

        let params = AddressParams {
            hrp: self.config.address.hrp.clone(),
            witness_version: decoded.witness_version,
        };
        let program = params.decode(address)?;
        Ok((decoded.witness_version, program))
    }
}
