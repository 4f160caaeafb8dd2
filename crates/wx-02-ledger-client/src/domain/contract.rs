//! # Contract Surface
//!
//! The writer registry's functions and events, and the encoding of each call.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::abi::{self, Decoder, Token, WORD};
use super::errors::AbiError;

/// A call into the writer registry contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// `newWriter(string key)`: binds `key` to the sender. Reverts on a
    /// duplicate key.
    NewWriter {
        /// Stealth address being registered
        key: String,
    },
    /// `postBlog(string title, string ipfsHash, string key, string proof)`
    PostBlog {
        /// Content title
        title: String,
        /// Off-chain content pointer
        content_pointer: String,
        /// Author's stealth address
        key: String,
        /// Authorship proof blob
        proof: String,
    },
    /// `realBlog(string key)`, payable.
    RealBlog {
        /// Author's stealth address
        key: String,
    },
    /// `tipWriter(string key)`, payable.
    TipWriter {
        /// Author's stealth address
        key: String,
    },
    /// `getBlogs()`: `(string[] titles, string[] ipfsHashes)`
    GetBlogs,
    /// `addresses(string)`: the real address bound to a key.
    Addresses {
        /// Stealth address to look up
        key: String,
    },
    /// `blogCount()`
    BlogCount,
    /// `blogs(uint256)`: one full record.
    Blogs {
        /// Record index
        index: u64,
    },
}

impl ContractCall {
    /// Canonical function signature.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::NewWriter { .. } => "newWriter(string)",
            Self::PostBlog { .. } => "postBlog(string,string,string,string)",
            Self::RealBlog { .. } => "realBlog(string)",
            Self::TipWriter { .. } => "tipWriter(string)",
            Self::GetBlogs => "getBlogs()",
            Self::Addresses { .. } => "addresses(string)",
            Self::BlogCount => "blogCount()",
            Self::Blogs { .. } => "blogs(uint256)",
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        let sig = self.signature();
        sig.split('(').next().unwrap_or(sig)
    }

    /// Whether the function accepts a value transfer.
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::RealBlog { .. } | Self::TipWriter { .. })
    }

    /// Whether the function is a `view` (served by `eth_call`).
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::GetBlogs | Self::Addresses { .. } | Self::BlogCount | Self::Blogs { .. }
        )
    }

    /// Calldata: selector plus encoded arguments.
    pub fn encode(&self) -> Vec<u8> {
        let tokens = match self {
            Self::NewWriter { key }
            | Self::RealBlog { key }
            | Self::TipWriter { key }
            | Self::Addresses { key } => vec![Token::String(key.clone())],
            Self::PostBlog {
                title,
                content_pointer,
                key,
                proof,
            } => vec![
                Token::String(title.clone()),
                Token::String(content_pointer.clone()),
                Token::String(key.clone()),
                Token::String(proof.clone()),
            ],
            Self::GetBlogs | Self::BlogCount => vec![],
            Self::Blogs { index } => vec![Token::Uint(U256::from(*index))],
        };
        abi::encode_call(self.signature(), &tokens)
    }
}

/// Events emitted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEvent {
    /// `NewWriterAdded(string indexed key, address indexed realKey)`
    NewWriterAdded,
    /// `BlogStored(string indexed title, string indexed ipfsHash, string key)`
    BlogStored,
    /// `FundsSent(address to, uint256 amount)`
    FundsSent,
    /// `TipsSent(address to, uint256 amount)`
    TipsSent,
    /// `BlogListGot(uint256 blogCount)`
    BlogListGot,
}

impl LedgerEvent {
    /// Canonical event signature.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::NewWriterAdded => "NewWriterAdded(string,address)",
            Self::BlogStored => "BlogStored(string,string,string)",
            Self::FundsSent => "FundsSent(address,uint256)",
            Self::TipsSent => "TipsSent(address,uint256)",
            Self::BlogListGot => "BlogListGot(uint256)",
        }
    }

    /// `topic0` for log filtering.
    pub fn topic(&self) -> [u8; 32] {
        abi::keccak256(self.signature().as_bytes())
    }
}

/// A full content record as returned by `blogs(uint256)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntry {
    /// Title
    pub title: String,
    /// Off-chain content pointer
    pub content_pointer: String,
    /// Authorship proof blob
    pub proof: String,
    /// Author's stealth address
    pub key: String,
}

impl BlogEntry {
    /// Decode the `(string, string, string, string)` getter result.
    pub fn decode(data: &[u8]) -> Result<Self, AbiError> {
        let decoder = Decoder::new(data);
        Ok(Self {
            title: decoder.string(0, 0)?,
            content_pointer: decoder.string(0, WORD)?,
            proof: decoder.string(0, 2 * WORD)?,
            key: decoder.string(0, 3 * WORD)?,
        })
    }

    /// Encode as the getter result. Used by stub nodes in tests.
    pub fn encode(&self) -> Vec<u8> {
        abi::encode(&[
            Token::String(self.title.clone()),
            Token::String(self.content_pointer.clone()),
            Token::String(self.proof.clone()),
            Token::String(self.key.clone()),
        ])
    }

    /// The `postBlog` call that would store this entry.
    pub fn to_call(&self) -> ContractCall {
        ContractCall::PostBlog {
            title: self.title.clone(),
            content_pointer: self.content_pointer.clone(),
            key: self.key.clone(),
            proof: self.proof.clone(),
        }
    }
}
