//! Human-readable QTC addresses.
//!
//! An address is the Bech32 encoding of `[witness_version] ‖ program` under
//! the `qtc` prefix, where the program is a 20-byte digest prefix. Each
//! derivation method owns a witness version; PQ-HD addresses use version 2,
//! which keeps them distinct from the primary method's version 1 addresses
//! even though both share the same hash-and-encode skeleton.

use std::fmt;

use bech32::{u5, FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};
use crate::types::{WitnessProgram, WITNESS_PROGRAM_LEN};

/// Human-readable prefix of every QTC address.
pub const QTC_HRP: &str = "qtc";

/// Witness version reserved for the PQ-HD derivation method.
pub const PQHD_WITNESS_VERSION: u8 = 2;

/// Witness version reserved for the primary derivation method.
pub const PRIMARY_WITNESS_VERSION: u8 = 1;

/// Checksum constant used for QTC addresses.
pub const ADDRESS_VARIANT: Variant = Variant::Bech32;

/// Maximum total length of a Bech32 string.
pub const MAX_ADDRESS_LEN: usize = 90;

/// An encoded address string.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An address split into its parts, without any expectation applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub hrp: String,
    pub witness_version: u8,
    pub variant: Variant,
    pub program: Vec<u8>,
}

impl DecodedAddress {
    /// Split `address` into prefix, witness version and program.
    ///
    /// Only the checksum and the 5-bit regrouping are validated here.
    pub fn parse(address: &str) -> Result<Self> {
        let (hrp, data, variant) =
            bech32::decode(address).map_err(|e| WalletError::Decoding(e.to_string()))?;

        let (version, words) = data
            .split_first()
            .ok_or_else(|| WalletError::Decoding("address carries no witness version".into()))?;

        let program = Vec::<u8>::from_base32(words)
            .map_err(|e| WalletError::Decoding(format!("invalid witness program: {e}")))?;

        Ok(Self {
            hrp,
            witness_version: version.to_u8(),
            variant,
            program,
        })
    }
}

/// The prefix and witness version an encoder is configured for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParams {
    pub hrp: String,
    pub witness_version: u8,
}

impl AddressParams {
    /// Parameters for PQ-HD addresses (`qtc`, version 2).
    pub fn pqhd() -> Self {
        Self {
            hrp: QTC_HRP.to_string(),
            witness_version: PQHD_WITNESS_VERSION,
        }
    }

    /// Parameters for primary-method addresses (`qtc`, version 1).
    pub fn primary() -> Self {
        Self {
            hrp: QTC_HRP.to_string(),
            witness_version: PRIMARY_WITNESS_VERSION,
        }
    }

    /// Encode a witness program.
    pub fn encode(&self, program: &WitnessProgram) -> Result<Address> {
        self.encode_program(program.as_bytes())
    }

    /// Encode raw program bytes, which must be exactly 20 bytes long.
    pub fn encode_program(&self, program: &[u8]) -> Result<Address> {
        if program.len() != WITNESS_PROGRAM_LEN {
            return Err(WalletError::Encoding(format!(
                "witness program must be {} bytes, got {}",
                WITNESS_PROGRAM_LEN,
                program.len()
            )));
        }

        let version = u5::try_from_u8(self.witness_version).map_err(|_| {
            WalletError::Encoding(format!(
                "witness version {} does not fit in 5 bits",
                self.witness_version
            ))
        })?;

        let mut data = Vec::with_capacity(1 + (WITNESS_PROGRAM_LEN * 8).div_ceil(5));
        data.push(version);
        data.extend(program.to_base32());

        let encoded = bech32::encode(&self.hrp, data, ADDRESS_VARIANT)
            .map_err(|e| WalletError::Encoding(e.to_string()))?;

        if encoded.len() > MAX_ADDRESS_LEN {
            return Err(WalletError::Encoding(format!(
                "address length {} exceeds {}",
                encoded.len(),
                MAX_ADDRESS_LEN
            )));
        }

        Ok(Address(encoded))
    }

    /// Decode `address`, accepting it only under these parameters.
    pub fn decode(&self, address: &str) -> Result<WitnessProgram> {
        let decoded = DecodedAddress::parse(address)?;

        if decoded.hrp != self.hrp {
            return Err(WalletError::Decoding(format!(
                "unexpected prefix {:?} (expected {:?})",
                decoded.hrp, self.hrp
            )));
        }
        if decoded.variant != ADDRESS_VARIANT {
            return Err(WalletError::Decoding(format!(
                "unexpected checksum variant {:?}",
                decoded.variant
            )));
        }
        if decoded.witness_version != self.witness_version {
            return Err(WalletError::Decoding(format!(
                "witness version {} not accepted (expected {})",
                decoded.witness_version, self.witness_version
            )));
        }

        WitnessProgram::try_from(decoded.program.as_slice()).map_err(|_| {
            WalletError::Decoding(format!(
                "witness program must be {} bytes, got {}",
                WITNESS_PROGRAM_LEN,
                decoded.program.len()
            ))
        })
    }
}

impl Default for AddressParams {
    fn default() -> Self {
        Self::pqhd()
    }
}
