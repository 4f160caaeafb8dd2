//! # ABI Codec
//!
//! The subset of the Solidity contract ABI used by the writer registry:
//! `string`, `string[]`, `uint256` and `address` values, 4-byte Keccak-256
//! function selectors, and `Error(string)` revert payloads.
//!
//! Every offset and length read from a payload is bounds checked against the
//! payload itself; malformed input yields an [`AbiError`].

use primitive_types::U256;
use sha3::{Digest, Keccak256};
use shared_types::Address;

use super::errors::AbiError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Selector of the standard `Error(string)` revert payload.
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// A value to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `string`
    String(String),
    /// `string[]`
    StringArray(Vec<String>),
    /// `uint256`
    Uint(U256),
    /// `address`
    Address(Address),
}

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// 4-byte function selector for a canonical signature such as
/// `newWriter(string)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode a full call: selector followed by the encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode(tokens));
    out
}

/// Encode a sequence of values as an ABI tuple.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_size = WORD * tokens.len();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::Address(address) => head.extend_from_slice(&address_word(address)),
            Token::String(s) => {
                head.extend_from_slice(&uint_word(U256::from(head_size + tail.len())));
                tail.extend(encode_bytes(s.as_bytes()));
            }
            Token::StringArray(items) => {
                head.extend_from_slice(&uint_word(U256::from(head_size + tail.len())));
                tail.extend(encode_string_array(items));
            }
        }
    }

    head.extend(tail);
    head
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&uint_word(U256::from(bytes.len())));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

fn encode_string_array(items: &[String]) -> Vec<u8> {
    let mut out = uint_word(U256::from(items.len())).to_vec();
    let tokens: Vec<Token> = items.iter().cloned().map(Token::String).collect();
    out.extend(encode(&tokens));
    out
}

/// Bounds-checked reader over an ABI payload.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Wrap a payload (without selector).
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], AbiError> {
        let truncated = AbiError::Truncated {
            offset,
            needed: len,
            len: self.data.len(),
        };
        let end = offset.checked_add(len).ok_or_else(|| truncated.clone())?;
        self.data.get(offset..end).ok_or(truncated)
    }

    /// Read a `uint256` word.
    pub fn uint(&self, offset: usize) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(self.slice(offset, WORD)?))
    }

    /// Read a word used as an offset or length; it can never exceed the
    /// payload size.
    fn size(&self, offset: usize) -> Result<usize, AbiError> {
        let value = self.uint(offset)?;
        if value > U256::from(self.data.len()) {
            return Err(AbiError::ValueOutOfRange(format!(
                "{} exceeds payload length {}",
                value,
                self.data.len()
            )));
        }
        Ok(value.low_u64() as usize)
    }

    fn locate(&self, base: usize, head_offset: usize) -> Result<usize, AbiError> {
        let relative = self.size(head_offset)?;
        base.checked_add(relative)
            .ok_or_else(|| AbiError::ValueOutOfRange(format!("offset {relative} overflows")))
    }

    /// Read an `address` word.
    pub fn address(&self, offset: usize) -> Result<Address, AbiError> {
        let word = self.slice(offset, WORD)?;
        let mut address = [0u8; 20];
        address.copy_from_slice(&word[12..]);
        Ok(Address(address))
    }

    /// Read a `string` whose head word sits at `head_offset`; the offset it
    /// holds is relative to `base` (the start of the enclosing tuple).
    pub fn string(&self, base: usize, head_offset: usize) -> Result<String, AbiError> {
        let start = self.locate(base, head_offset)?;
        let len = self.size(start)?;
        let bytes = self.slice(start + WORD, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
    }

    /// Read a `string[]` whose head word sits at `head_offset`.
    pub fn string_array(&self, base: usize, head_offset: usize) -> Result<Vec<String>, AbiError> {
        let start = self.locate(base, head_offset)?;
        let count = self.size(start)?;
        let items_base = start + WORD;
        let heads_len = count
            .checked_mul(WORD)
            .ok_or_else(|| AbiError::ValueOutOfRange(format!("array length {count}")))?;
        self.slice(items_base, heads_len)?;

        (0..count)
            .map(|i| self.string(items_base, items_base + i * WORD))
            .collect()
    }
}

/// Decode the `(string[], string[])` return value of `getBlogs()`.
pub fn decode_string_array_pair(data: &[u8]) -> Result<(Vec<String>, Vec<String>), AbiError> {
    let decoder = Decoder::new(data);
    let first = decoder.string_array(0, 0)?;
    let second = decoder.string_array(0, WORD)?;
    Ok((first, second))
}

/// Decode a single `uint256` return value.
pub fn decode_uint(data: &[u8]) -> Result<U256, AbiError> {
    Decoder::new(data).uint(0)
}

/// Decode a single `address` return value.
pub fn decode_address(data: &[u8]) -> Result<Address, AbiError> {
    Decoder::new(data).address(0)
}

/// Decode an `Error(string)` revert payload into its message.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    let body = data.strip_prefix(&ERROR_STRING_SELECTOR)?;
    Decoder::new(body).string(0, 0).ok()
}
