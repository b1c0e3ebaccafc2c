//! Fixed-size artifacts produced by the derivation pipeline.
//!
//! Every intermediate is a newtype so that a shared secret can never be
//! passed where a signature seed is expected. Secret-bearing types are wiped
//! when dropped and never print their contents.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the KEM keygen seed (`d ‖ z`).
pub const KEM_SEED_LEN: usize = 64;

/// Length of the KEM shared secret.
pub const SHARED_SECRET_LEN: usize = 32;

/// Length of the signature keygen seed.
pub const SIGNATURE_SEED_LEN: usize = 32;

/// Length of the wide master-entropy digest.
pub const MASTER_ENTROPY_LEN: usize = 64;

/// Length of the narrow address digest.
pub const ADDRESS_HASH_LEN: usize = 32;

/// Length of the witness program carried by an address.
pub const WITNESS_PROGRAM_LEN: usize = 20;

/// Random seed consumed by KEM key generation.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KemSeed([u8; KEM_SEED_LEN]);

impl KemSeed {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEM_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; KEM_SEED_LEN] {
        &self.0
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; KEM_SEED_LEN];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for KemSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KemSeed(<redacted>)")
    }
}

/// The KEM shared secret: sole root of everything derived after stage 1.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LEN]);

impl SharedSecret {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SHARED_SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SHARED_SECRET_LEN] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SharedSecret {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; SHARED_SECRET_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// Seed fed to the signature scheme's key generation.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SignatureSeed([u8; SIGNATURE_SEED_LEN]);

impl SignatureSeed {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_SEED_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SignatureSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignatureSeed(<redacted>)")
    }
}

/// A 64-byte SHA3-512 digest over `shared_secret ‖ signature_public_key`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MasterEntropy(pub [u8; MASTER_ENTROPY_LEN]);

impl MasterEntropy {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; MASTER_ENTROPY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; MASTER_ENTROPY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex prefix, safe for progress output.
    pub fn preview(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl fmt::Debug for MasterEntropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterEntropy({}...)", self.preview())
    }
}

impl AsRef<[u8]> for MasterEntropy {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte SHA3-256 digest of the master entropy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressHash(pub [u8; ADDRESS_HASH_LEN]);

impl AddressHash {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_HASH_LEN] {
        &self.0
    }

    /// The 160-bit witness program: the first 20 bytes of the digest.
    pub fn witness_program(&self) -> WitnessProgram {
        let mut program = [0u8; WITNESS_PROGRAM_LEN];
        program.copy_from_slice(&self.0[..WITNESS_PROGRAM_LEN]);
        WitnessProgram(program)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AddressHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressHash({})", &self.to_hex()[..16])
    }
}

/// The 20-byte payload of an address, without its witness version.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WitnessProgram(pub [u8; WITNESS_PROGRAM_LEN]);

impl WitnessProgram {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; WITNESS_PROGRAM_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; WITNESS_PROGRAM_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for WitnessProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WitnessProgram({})", self.to_hex())
    }
}

impl TryFrom<&[u8]> for WitnessProgram {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; WITNESS_PROGRAM_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}
