//! Re-derivation check for an existing wallet record.
//!
//! Everything after stage 1 is a pure function of the shared secret, so a
//! record can be checked without the original seed: rebuild the signature
//! keypair, master entropy and address from the recorded shared secret and
//! compare field by field.

use crate::address::Address;
use crate::derive::{derive_address, derive_signature_keypair, WalletDeriver};
use crate::error::{Result, WalletError};
use crate::kem::Kem;
use crate::record::{WalletRecord, DESCRIPTION, FORMAT_VERSION, METHOD};
use crate::signature::SignatureScheme;
use crate::types::{MasterEntropy, SharedSecret, WitnessProgram};

/// What a successful check established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub address: Address,
    pub witness_program: WitnessProgram,
    pub master_entropy: MasterEntropy,
}

fn mismatch(field: &'static str, reason: impl Into<String>) -> WalletError {
    WalletError::Verification {
        field,
        reason: reason.into(),
    }
}

/// Check `record` against what `deriver` would produce from its shared secret.
///
/// Returns the first inconsistent field as [`WalletError::Verification`].
pub fn verify_record<K: Kem, S: SignatureScheme>(
    deriver: &WalletDeriver<K, S>,
    record: &WalletRecord,
) -> Result<VerificationReport> {
    let params = deriver.params();

    if record.method() != METHOD {
        return Err(mismatch("method", format!("unknown method {:?}", record.method())));
    }
    if record.version() != FORMAT_VERSION {
        return Err(mismatch("version", format!("unsupported version {:?}", record.version())));
    }
    if record.description() != DESCRIPTION {
        return Err(mismatch("description", format!("expected {DESCRIPTION:?}")));
    }
    if record.witness_version() != params.witness_version {
        return Err(mismatch(
            "witness_version",
            format!("expected {}, got {}", params.witness_version, record.witness_version()),
        ));
    }
    if !record.quantum_safe() {
        return Err(mismatch("quantum_safe", "must be true"));
    }
    let algorithm = deriver.algorithm_label();
    if record.algorithm() != algorithm {
        return Err(mismatch("algorithm", format!("expected {algorithm:?}")));
    }

    let bytes = record.decode_bytes()?;

    let shared_secret = SharedSecret::try_from(bytes.shared_secret.as_slice()).map_err(|_| {
        mismatch(
            "kyber_shared_secret_b64",
            format!("expected 32 bytes, got {}", bytes.shared_secret.len()),
        )
    })?;

    deriver
        .kem()
        .check_keypair_bytes(&bytes.kyber_public, &bytes.kyber_private)?;

    let (_, keypair) = derive_signature_keypair(deriver.scheme(), &shared_secret)?;
    if keypair.public_key != bytes.dilithium_public {
        return Err(mismatch(
            "dilithium_public_b64",
            "does not match the key derived from the shared secret",
        ));
    }
    if keypair.secret_key != bytes.dilithium_private {
        return Err(mismatch(
            "dilithium_private_b64",
            "does not match the key derived from the shared secret",
        ));
    }

    let derivation = derive_address(&shared_secret, &keypair.public_key, params)?;
    if derivation.combined_input.as_slice() != bytes.combined_input.as_slice() {
        return Err(mismatch(
            "combined_input_b64",
            "is not shared_secret ‖ signature public key",
        ));
    }
    if derivation.master_entropy.as_bytes().as_slice() != bytes.master_entropy.as_slice() {
        return Err(mismatch("master_entropy_b64", "does not match re-derived entropy"));
    }
    if derivation.address.as_str() != record.address() {
        return Err(mismatch(
            "address",
            format!("re-derived {}", derivation.address),
        ));
    }

    let witness_program = params.decode(record.address())?;

    Ok(VerificationReport {
        address: derivation.address,
        witness_program,
        master_entropy: derivation.master_entropy,
    })
}
