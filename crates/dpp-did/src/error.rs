//! # DID Resolution Errors
//!
//! Every variant here is an expected outcome of resolving attacker- or
//! network-controlled input. [`DidResolver::resolve`](crate::DidResolver::resolve)
//! logs these at `warn` and returns `None`; they only surface as values from
//! [`DidResolver::try_resolve`](crate::DidResolver::try_resolve) and the
//! lower-level parsing functions.

use dpp_core::{DecodeError, ValidationError};
use thiserror::Error;

/// Errors while turning multicodec-prefixed bytes into a verification method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    /// The two-byte multicodec prefix is not a supported public key codec.
    #[error("unsupported multicodec key type: 0x{prefix}")]
    UnsupportedKeyType {
        /// Hex rendering of the (up to two) prefix bytes.
        prefix: String,
    },

    /// The key bytes after the prefix have the wrong length for the codec.
    #[error("invalid {key_type} public key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key type named by the prefix.
        key_type: &'static str,
        /// Accepted length(s).
        expected: &'static str,
        /// Length found.
        actual: usize,
    },
}

/// Errors while interpreting a decoded JSON value as a DID document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document is not a JSON object.
    #[error("DID document must be a JSON object")]
    NotAnObject,

    /// The document has no string `id`.
    #[error("DID document has no string \"id\"")]
    MissingId,

    /// The document `id` is not a valid DID.
    #[error("DID document id is invalid: {0}")]
    InvalidId(#[from] ValidationError),
}

/// Errors while resolving a DID to its document.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The input is not a syntactically valid DID.
    #[error("invalid DID: {0}")]
    InvalidDid(#[from] ValidationError),

    /// The DID method is not `web` or `key`.
    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),

    /// The `did:web` method-specific identifier cannot be mapped to a URL.
    #[error("invalid did:web identifier {did}: {reason}")]
    InvalidDidWeb {
        /// The DID being resolved.
        did: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The `did:key` multibase value could not be decoded.
    #[error("invalid did:key multibase value: {0}")]
    Multibase(#[from] DecodeError),

    /// The `did:key` key bytes could not be parsed.
    #[error("invalid did:key key material: {0}")]
    KeyParse(#[from] KeyParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// Transport failure fetching the document.
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        /// Document URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("timed out fetching {url}")]
    Timeout {
        /// Document URL.
        url: String,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Document URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body is not valid JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    InvalidJson {
        /// Document URL.
        url: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },

    /// The JSON is not a usable DID document.
    #[error("invalid DID document: {0}")]
    InvalidDocument(#[from] DocumentError),

    /// The fetched document describes a different DID.
    #[error("DID document id {found} does not match requested DID {requested}")]
    IdMismatch {
        /// The DID that was resolved.
        requested: String,
        /// The `id` found in the document.
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_key_type_renders_hex_prefix() {
        let err = KeyParseError::UnsupportedKeyType {
            prefix: "e701".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported multicodec key type: 0xe701");
    }

    #[test]
    fn invalid_key_length_display() {
        let err = KeyParseError::InvalidKeyLength {
            key_type: "Ed25519",
            expected: "32",
            actual: 31,
        };
        let msg = err.to_string();
        assert!(msg.contains("Ed25519"));
        assert!(msg.contains("expected 32"));
        assert!(msg.contains("got 31"));
    }

    #[test]
    fn resolution_error_wraps_lower_layers() {
        let err = ResolutionError::from(KeyParseError::UnsupportedKeyType {
            prefix: "0000".to_string(),
        });
        assert!(err.to_string().contains("0x0000"));

        let err = ResolutionError::from(DecodeError::UnsupportedMultibase("u".to_string()));
        assert!(err.to_string().starts_with("invalid did:key multibase value"));

        let err = ResolutionError::from(DocumentError::MissingId);
        assert!(err.to_string().contains("\"id\""));
    }

    #[test]
    fn status_error_display() {
        let err = ResolutionError::Status {
            url: "https://example.com/.well-known/did.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/.well-known/did.json returned HTTP 404"
        );
    }
}
