//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Higher layers (resolution, signature verification, credential
//! verification) define their own error enums and convert these with
//! `#[from]`. None of them escape a public verification boundary: the
//! resolver turns failures into `None`, the signature verifier into `false`,
//! and the credential verifier into human-readable result messages.

use thiserror::Error;

/// Errors while decoding base58btc / multibase text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A character outside the 58-symbol Bitcoin alphabet was found.
    #[error("invalid base58btc character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte index of the character in the input.
        index: usize,
    },

    /// The multibase prefix is not `z` (base58btc), the only supported base.
    #[error("unsupported multibase prefix {0:?} (only 'z' base58btc is supported)")]
    UnsupportedMultibase(String),

    /// The multibase string is empty (no prefix at all).
    #[error("empty multibase string")]
    Empty,

    /// Base64 / base64url decoding failed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Validation errors for identifier newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// DID does not conform to `did:<method>:<method-specific-id>`.
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),
}

/// Errors while building canonical verify data.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value to canonicalize is not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_character_display_names_character_and_index() {
        let err = DecodeError::InvalidCharacter {
            character: '0',
            index: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("'0'"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn unsupported_multibase_display() {
        let err = DecodeError::UnsupportedMultibase("u".to_string());
        assert!(err.to_string().contains("\"u\""));
    }

    #[test]
    fn invalid_did_display() {
        let err = ValidationError::InvalidDid("not-a-did".to_string());
        assert!(err.to_string().contains("not-a-did"));
    }

    #[test]
    fn canonicalization_not_object_display() {
        let err = CanonicalizationError::NotAnObject("array");
        assert_eq!(err.to_string(), "expected a JSON object, found array");
    }
}
