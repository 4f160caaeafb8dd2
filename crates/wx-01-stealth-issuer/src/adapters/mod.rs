//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the issuer port against the real issuance service.

mod http;

pub use http::HttpStealthIssuer;
