#![deny(missing_docs)]

//! # dpp-core — Foundational Types for Credential Verification
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Validated identifiers.** A [`Did`] can only be constructed from a
//!    string in `did:<method>:<id>` form.
//!
//! 2. **[`KeyAlgorithm`] is decided once.** Key material is classified into a
//!    closed enum when it is parsed. Signature dispatch matches on the enum,
//!    never on raw `kty`/`crv` strings, and never on untrusted token headers.
//!
//! 3. **[`VerifyData`] is the sole path to signed bytes.** Embedded proofs are
//!    checked against bytes produced by one canonicalization routine.
//!
//! 4. **Structured errors.** `thiserror` enums, no `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod codec;
pub mod error;
pub mod identity;
pub mod jwk;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::{canonical_json, VerifyData};
pub use codec::{
    decode_base58btc, decode_base64, decode_base64url, decode_multibase, encode_base58btc,
    encode_base64url, encode_multibase,
};
pub use error::{CanonicalizationError, DecodeError, ValidationError};
pub use identity::Did;
pub use jwk::{Jwk, KeyAlgorithm};
