//! # Core Domain Entities
//!
//! Defines the entities exchanged during writer registration and dashboard
//! loading.
//!
//! ## Clusters
//!
//! - **Identity**: `RealIdentity`, `StealthAddress`, `StealthIdentity`
//! - **Content**: `ContentRecord`, `RecordSequences`
//! - **Ledger**: `Address`, `TxHash`, `Receipt`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ParseError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// The participant's real public identifier, as reported by the wallet.
///
/// Obtained once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RealIdentity(String);

impl RealIdentity {
    /// Create a new identity. Empty (or whitespace-only) values are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ParseError::Empty("real identity"));
        }
        Ok(Self(value))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RealIdentity {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RealIdentity> for String {
    fn from(identity: RealIdentity) -> Self {
        identity.0
    }
}

impl fmt::Display for RealIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A one-time alias issued by the stealth issuance service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StealthAddress(String);

impl StealthAddress {
    /// Create a new stealth address. Empty values are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ParseError::Empty("stealth address"));
        }
        Ok(Self(value))
    }

    /// Borrow the raw address (this is the `key` passed to the ledger).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StealthAddress {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StealthAddress> for String {
    fn from(address: StealthAddress) -> Self {
        address.0
    }
}

impl fmt::Display for StealthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stealth identity together with its presence flag.
///
/// For a fixed [`RealIdentity`] the issuer always returns the same
/// `address`; `already_registered` is `false` on the first issuance only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthIdentity {
    /// The issued alias.
    pub address: StealthAddress,
    /// Whether the real identity was already mapped before this call.
    pub already_registered: bool,
}

impl StealthIdentity {
    /// Identity issued for the first time.
    pub fn fresh(address: StealthAddress) -> Self {
        Self {
            address,
            already_registered: false,
        }
    }

    /// Identity that was re-issued for a known real identity.
    pub fn existing(address: StealthAddress) -> Self {
        Self {
            address,
            already_registered: true,
        }
    }
}

// =============================================================================
// CLUSTER B: CONTENT
// =============================================================================

/// One published content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Human readable title.
    pub title: String,
    /// Opaque pointer (e.g. an IPFS CID) to the off-chain content.
    pub content_pointer: String,
}

impl ContentRecord {
    /// Create a record from its parts.
    pub fn new(title: impl Into<String>, content_pointer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_pointer: content_pointer.into(),
        }
    }
}

/// The two parallel sequences returned by the ledger's `getBlogs()`.
///
/// No length relation is guaranteed here; callers must validate before
/// zipping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSequences {
    /// Record titles, index-aligned with `pointers`.
    pub titles: Vec<String>,
    /// Content pointers, index-aligned with `titles`.
    pub pointers: Vec<String>,
}

// =============================================================================
// CLUSTER C: LEDGER
// =============================================================================

/// Decode a `0x`-prefixed (prefix optional) hex string into exactly `N` bytes.
pub fn decode_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| ParseError::InvalidLength {
            expected: N,
            got: b.len(),
        })
}

macro_rules! hex_newtype {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_fixed_hex::<$len>(s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_newtype!(
    /// A 20-byte account or contract address.
    Address,
    20
);

hex_newtype!(
    /// A 32-byte transaction hash.
    TxHash,
    32
);

/// Confirmation that a ledger write was mined successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the mined transaction.
    pub tx_hash: TxHash,
    /// Block the transaction was included in, when reported.
    pub block_number: Option<u64>,
    /// Gas consumed, when reported.
    pub gas_used: Option<u64>,
}

impl Receipt {
    /// Receipt carrying only the transaction hash.
    pub fn new(tx_hash: TxHash) -> Self {
        Self {
            tx_hash,
            block_number: None,
            gas_used: None,
        }
    }
}
