//! The wallet record: the single artifact a run emits.
//!
//! Binary fields are standard base64. Field order and names match the
//! `QTC-PQHD-1.0` document layout so records stay readable by existing
//! external wallets.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::derive::DerivedWallet;
use crate::error::{Result, WalletError};

/// Method identifier for PQ-HD records.
pub const METHOD: &str = "PQ-HD";

/// Record format version.
pub const FORMAT_VERSION: &str = "QTC-PQHD-1.0";

/// Description written into every record.
pub const DESCRIPTION: &str = "QTC PQ-HD Wallet for External Wallet Integration";

/// A fully derived PQ-HD wallet.
///
/// Built once by [`WalletRecord::assemble`] and never modified. It holds the
/// complete secret key material: it is a self-custody export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    address: String,
    method: String,
    witness_version: u8,
    master_entropy_b64: String,
    kyber_public_b64: String,
    kyber_private_b64: String,
    dilithium_public_b64: String,
    dilithium_private_b64: String,
    kyber_shared_secret_b64: String,
    combined_input_b64: String,
    algorithm: String,
    quantum_safe: bool,
    version: String,
    description: String,
}

impl WalletRecord {
    /// Package the artifacts of a pipeline run.
    pub fn assemble(derived: &DerivedWallet, algorithm: &str) -> Self {
        Self {
            address: derived.address.to_string(),
            method: METHOD.to_string(),
            witness_version: derived.witness_version,
            master_entropy_b64: STANDARD.encode(derived.master_entropy.as_bytes()),
            kyber_public_b64: STANDARD.encode(&derived.kem_public_key),
            kyber_private_b64: STANDARD.encode(derived.kem_secret_key.as_slice()),
            dilithium_public_b64: STANDARD.encode(&derived.signature_keypair.public_key),
            dilithium_private_b64: STANDARD.encode(&derived.signature_keypair.secret_key),
            kyber_shared_secret_b64: STANDARD.encode(derived.shared_secret.as_bytes()),
            combined_input_b64: STANDARD.encode(derived.combined_input.as_slice()),
            algorithm: algorithm.to_string(),
            quantum_safe: true,
            version: FORMAT_VERSION.to_string(),
            description: DESCRIPTION.to_string(),
        }
    }

    /// Parse a record document.
    pub fn from_json(document: &str) -> Result<Self> {
        serde_json::from_str(document).map_err(|e| WalletError::Decoding(e.to_string()))
    }

    /// Pretty-printed JSON document (two-space indentation).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn witness_version(&self) -> u8 {
        self.witness_version
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn quantum_safe(&self) -> bool {
        self.quantum_safe
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn master_entropy_b64(&self) -> &str {
        &self.master_entropy_b64
    }

    pub fn kyber_public_b64(&self) -> &str {
        &self.kyber_public_b64
    }

    pub fn kyber_private_b64(&self) -> &str {
        &self.kyber_private_b64
    }

    pub fn dilithium_public_b64(&self) -> &str {
        &self.dilithium_public_b64
    }

    pub fn dilithium_private_b64(&self) -> &str {
        &self.dilithium_private_b64
    }

    pub fn kyber_shared_secret_b64(&self) -> &str {
        &self.kyber_shared_secret_b64
    }

    pub fn combined_input_b64(&self) -> &str {
        &self.combined_input_b64
    }

    /// Decode every binary field.
    pub fn decode_bytes(&self) -> Result<RecordBytes> {
        Ok(RecordBytes {
            master_entropy: decode_field("master_entropy_b64", &self.master_entropy_b64)?,
            kyber_public: decode_field("kyber_public_b64", &self.kyber_public_b64)?,
            kyber_private: decode_field("kyber_private_b64", &self.kyber_private_b64)?,
            dilithium_public: decode_field("dilithium_public_b64", &self.dilithium_public_b64)?,
            dilithium_private: decode_field("dilithium_private_b64", &self.dilithium_private_b64)?,
            shared_secret: decode_field("kyber_shared_secret_b64", &self.kyber_shared_secret_b64)?,
            combined_input: decode_field("combined_input_b64", &self.combined_input_b64)?,
        })
    }
}

/// The binary fields of a record, base64-decoded.
pub struct RecordBytes {
    pub master_entropy: Vec<u8>,
    pub kyber_public: Vec<u8>,
    pub kyber_private: Vec<u8>,
    pub dilithium_public: Vec<u8>,
    pub dilithium_private: Vec<u8>,
    pub shared_secret: Vec<u8>,
    pub combined_input: Vec<u8>,
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| WalletError::Decoding(format!("{field}: {e}")))
}
