//! Sigil: compact signed tokens in the three-segment
//! `header.payload.signature` form, with pluggable signature algorithms.
//!
//! Supports ECDSA over the NIST curves with selectable digests (ES256,
//! ES384, ES512), ECDSA over secp256k1 (ES256k), and Ed25519.

pub mod claims;
pub mod ecdsa;
pub mod ed25519;
pub mod error;
pub mod es256k;
pub mod key;
pub mod signer;
pub mod token;
