//! Signature verification errors.
//!
//! These stay inside the crate's fallible `try_*` functions. The boolean and
//! `Option` entry points log them and return `false` / `None`.

use dpp_core::{DecodeError, KeyAlgorithm};
use thiserror::Error;

use crate::signature::SignatureAlgorithm;

/// Why a signature could not be verified.
#[derive(Error, Debug)]
pub enum SignatureError {
    /// The requested algorithm is not Ed25519, ES256 or ES384.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The public key could not be decoded or is not a valid curve point.
    #[error("malformed public key: {0}")]
    MalformedKey(String),

    /// The signature bytes have the wrong length or encoding.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The key material belongs to a different algorithm than requested.
    #[error("{found} key cannot verify {expected} signatures")]
    KeyAlgorithmMismatch {
        /// Algorithm requested by the caller.
        expected: SignatureAlgorithm,
        /// Algorithm implied by the key.
        found: KeyAlgorithm,
    },

    /// The signature does not verify under the key.
    #[error("signature does not match")]
    Mismatch,

    /// The verification method has no `publicKeyJwk`.
    #[error("verification method {0} has no publicKeyJwk")]
    MissingJwk(String),

    /// The key type is unknown, unsupported, or contradictory.
    #[error("verification method {0} has an unknown key type")]
    UnknownKeyType(String),

    /// A key coordinate is not valid base64url.
    #[error("key decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The compact JWS was rejected for a reason other than a bad signature.
    #[error("invalid JWS: {0}")]
    Jws(jsonwebtoken::errors::Error),

    /// The JWS payload is not a JSON object.
    #[error("JWS payload is not a JSON object")]
    PayloadNotObject,
}
