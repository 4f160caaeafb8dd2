//! # Domain Entities
//!
//! Transaction payloads handed to the wallet.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::contract::ContractCall;

/// A transaction for the wallet to sign and submit.
///
/// Serializes to the `eth_sendTransaction` / `eth_call` parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Sender (the participant's real address)
    pub from: Address,
    /// Contract address
    pub to: Address,
    /// Calldata
    #[serde(with = "hex_data")]
    pub data: Vec<u8>,
    /// Value transfer for payable calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Gas limit; the node estimates when absent
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_quantity")]
    pub gas: Option<u64>,
}

impl TransactionRequest {
    /// Build a request for a contract call.
    pub fn for_call(from: Address, to: Address, call: &ContractCall) -> Self {
        Self {
            from,
            to,
            data: call.encode(),
            value: None,
            gas: None,
        }
    }

    /// Attach a value transfer.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

mod hex_data {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(data)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

mod hex_quantity {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&format!("{v:#x}")),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let s: Option<String> = Option::deserialize(d)?;
        s.map(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
