//! # Binary-to-Text Codecs
//!
//! Base58btc (Bitcoin alphabet) and its multibase `z` form, plus the base64
//! variants used by JWKs and non-multibase proof values.
//!
//! ## Base58btc
//!
//! The input is treated as a big-endian base-58 integer. Every leading `'1'`
//! maps to one leading `0x00` byte and vice versa, so
//! `decode_base58btc(&encode_base58btc(b)) == b` holds for every byte string,
//! including the empty string and all-zero inputs.
//!
//! ## Base64
//!
//! JWK coordinates are unpadded base64url per RFC 7517, but some issuers pad
//! them anyway. Decoding is padding-indifferent; encoding never pads.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::DecodeError;

/// The Bitcoin base58 alphabet.
pub const BASE58BTC_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Multibase prefix for base58btc.
pub const MULTIBASE_BASE58BTC: char = 'z';

const URL_SAFE_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as base58btc (no multibase prefix).
pub fn encode_base58btc(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a base58btc string (no multibase prefix).
pub fn decode_base58btc(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    bs58::decode(encoded)
        .into_vec()
        .map_err(|_| first_invalid_character(encoded))
}

/// Encode bytes as a multibase base58btc string (`z` + base58btc).
pub fn encode_multibase(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 138 / 100 + 2);
    out.push(MULTIBASE_BASE58BTC);
    out.push_str(&encode_base58btc(bytes));
    out
}

/// Decode a multibase string. Only the `z` (base58btc) base is supported.
pub fn decode_multibase(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let mut chars = encoded.chars();
    match chars.next() {
        None => Err(DecodeError::Empty),
        Some(MULTIBASE_BASE58BTC) => decode_base58btc(chars.as_str()),
        Some(other) => Err(DecodeError::UnsupportedMultibase(other.to_string())),
    }
}

/// Encode bytes as unpadded base64url.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_INDIFFERENT.encode(bytes)
}

/// Decode base64url, with or without padding.
pub fn decode_base64url(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(URL_SAFE_INDIFFERENT.decode(encoded)?)
}

/// Decode standard-alphabet base64, with or without padding.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD_INDIFFERENT.decode(encoded)?)
}

/// Locate the first character that is not in the base58btc alphabet.
fn first_invalid_character(encoded: &str) -> DecodeError {
    let (index, character) = encoded
        .char_indices()
        .find(|(_, c)| !BASE58BTC_ALPHABET.contains(*c))
        .unwrap_or((0, '\0'));
    DecodeError::InvalidCharacter { character, index }
}
