//! # Multicodec Public Keys
//!
//! Maps the multicodec-prefixed bytes of a `did:key` identifier to a
//! verification method.
//!
//! | Prefix   | Key     | Length after prefix |
//! |----------|---------|---------------------|
//! | `0xed01` | Ed25519 | 32                  |
//! | `0x8024` | P-256   | 33 or 65 (SEC1)     |
//! | `0x8124` | P-384   | 49 or 97 (SEC1)     |
//!
//! Ed25519 keys are exposed as an OKP JWK. P-256 and P-384 keys keep their
//! multibase form only: compressed points are not decompressed, so these
//! methods carry no JWK and are rejected by signature verification.

use dpp_core::{encode_base64url, encode_multibase, Did, Jwk};

use crate::document::VerificationMethod;
use crate::error::KeyParseError;

/// Multicodec prefix for an Ed25519 public key.
pub const ED25519_PUB: [u8; 2] = [0xed, 0x01];
/// Multicodec prefix for a P-256 public key.
pub const P256_PUB: [u8; 2] = [0x80, 0x24];
/// Multicodec prefix for a P-384 public key.
pub const P384_PUB: [u8; 2] = [0x81, 0x24];

/// Build the verification method for a `did:key` from its decoded bytes.
///
/// # Errors
///
/// [`KeyParseError::UnsupportedKeyType`] for an unknown prefix and
/// [`KeyParseError::InvalidKeyLength`] when the key has the wrong size.
pub fn parse(did: &Did, bytes: &[u8]) -> Result<VerificationMethod, KeyParseError> {
    if bytes.len() < 2 {
        return Err(KeyParseError::UnsupportedKeyType {
            prefix: hex(bytes),
        });
    }
    let (prefix, key) = bytes.split_at(2);

    let id = format!("{did}#{}", did.method_specific_id());
    match [prefix[0], prefix[1]] {
        ED25519_PUB => {
            check_length("Ed25519", "32", key, &[32])?;
            Ok(VerificationMethod {
                id,
                method_type: "Ed25519VerificationKey2020".to_string(),
                controller: did.to_string(),
                public_key_jwk: Some(Jwk::ed25519(encode_base64url(key))),
                public_key_multibase: None,
                public_key_base58: None,
            })
        }
        P256_PUB => {
            check_length("P-256", "33 or 65", key, &[33, 65])?;
            Ok(multibase_method(id, did, bytes))
        }
        P384_PUB => {
            check_length("P-384", "49 or 97", key, &[49, 97])?;
            Ok(multibase_method(id, did, bytes))
        }
        _ => Err(KeyParseError::UnsupportedKeyType {
            prefix: hex(prefix),
        }),
    }
}

fn check_length(
    key_type: &'static str,
    expected: &'static str,
    key: &[u8],
    accepted: &[usize],
) -> Result<(), KeyParseError> {
    if accepted.contains(&key.len()) {
        Ok(())
    } else {
        Err(KeyParseError::InvalidKeyLength {
            key_type,
            expected,
            actual: key.len(),
        })
    }
}

fn multibase_method(id: String, did: &Did, bytes: &[u8]) -> VerificationMethod {
    VerificationMethod {
        id,
        method_type: "JsonWebKey2020".to_string(),
        controller: did.to_string(),
        public_key_jwk: None,
        public_key_multibase: Some(encode_multibase(bytes)),
        public_key_base58: None,
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
