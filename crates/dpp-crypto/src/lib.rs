//! # dpp-crypto — Signature Verification
//!
//! Verifies the signatures attached to Digital Product Passport credentials:
//!
//! - **Raw signatures** (`signature.rs`): Ed25519, ECDSA P-256 with SHA-256
//!   and ECDSA P-384 with SHA-384, from a JWK or raw key bytes, and from a
//!   DID verification method.
//!
//! - **Compact JWS** (`jws.rs`): `jsonwebtoken` verification with the
//!   algorithm taken from the key, never from the token.
//!
//! ## Security Invariant
//!
//! Verification is total. Malformed keys, malformed signatures, unsupported
//! algorithms and mismatches all produce `false` or `None`; nothing panics
//! on attacker-controlled input.
//!
//! ## Crate Policy
//!
//! - Depends on `dpp-core` and `dpp-did` internally.
//! - Tests sign with real keys (`ed25519-dalek`, `p256`, `p384`); no mocked
//!   cryptography.

pub mod error;
pub mod jws;
pub mod signature;

pub use error::SignatureError;
pub use jws::{try_verify_jws, verify_jws};
pub use signature::{verify_signature, PublicKeyMaterial, SignatureAlgorithm, SignatureVerifier};
