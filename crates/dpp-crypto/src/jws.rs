//! # Compact JWS Verification
//!
//! Verifies `header.payload.signature` tokens with `jsonwebtoken`.
//!
//! ## Security Invariant
//!
//! The accepted algorithm is derived from the JWK (`OKP/Ed25519` to EdDSA,
//! `EC/P-256` to ES256, `EC/P-384` to ES384) and is the only entry in the
//! validation allow-list. A token whose header names any other algorithm is
//! rejected before its signature is examined, which closes the
//! algorithm-confusion and `alg: none` attacks.
//!
//! Registered claims (`exp`, `nbf`, `aud`, ...) are not validated here;
//! only the signature is.

use dpp_core::{decode_base64url, encode_base64url, Jwk};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::error::SignatureError;
use crate::signature::SignatureAlgorithm;

/// Verify a compact JWS and return its payload.
///
/// `Some(payload)` means the signature verified under `jwk`. Malformed
/// tokens, unsupported keys, algorithm mismatches, bad signatures and
/// non-object payloads all yield `None`.
pub fn verify_jws(token: &str, jwk: &Jwk) -> Option<Value> {
    match try_verify_jws(token, jwk) {
        Ok(payload) => Some(payload),
        Err(SignatureError::Mismatch) => {
            tracing::debug!("JWS signature mismatch");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "JWS verification failed");
            None
        }
    }
}

/// Fallible form of [`verify_jws`].
///
/// # Errors
///
/// [`SignatureError::UnknownKeyType`] for an unsupported JWK,
/// [`SignatureError::Mismatch`] for a bad signature,
/// [`SignatureError::PayloadNotObject`] for a non-object payload and
/// [`SignatureError::Jws`] for every other rejection.
pub fn try_verify_jws(token: &str, jwk: &Jwk) -> Result<Value, SignatureError> {
    let algorithm = SignatureAlgorithm::for_key(jwk.key_algorithm()).ok_or_else(|| {
        SignatureError::UnknownKeyType(jwk.kid.clone().unwrap_or_else(|| "JWK".to_string()))
    })?;
    let key = decoding_key(jwk, algorithm)?;

    let mut validation = Validation::new(jose_algorithm(algorithm));
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;

    let data = jsonwebtoken::decode::<Value>(token, &key, &validation).map_err(|e| {
        if matches!(e.kind(), ErrorKind::InvalidSignature) {
            SignatureError::Mismatch
        } else {
            SignatureError::Jws(e)
        }
    })?;

    match data.claims {
        payload @ Value::Object(_) => Ok(payload),
        _ => Err(SignatureError::PayloadNotObject),
    }
}

fn jose_algorithm(algorithm: SignatureAlgorithm) -> Algorithm {
    match algorithm {
        SignatureAlgorithm::Ed25519 => Algorithm::EdDSA,
        SignatureAlgorithm::Es256 => Algorithm::ES256,
        SignatureAlgorithm::Es384 => Algorithm::ES384,
    }
}

/// Re-encode a coordinate as unpadded base64url after checking its length.
fn coordinate(value: &Option<String>, name: &str, len: usize) -> Result<String, SignatureError> {
    let encoded = value
        .as_deref()
        .ok_or_else(|| SignatureError::MalformedKey(format!("JWK has no \"{name}\"")))?;
    let bytes = decode_base64url(encoded)?;
    if bytes.len() != len {
        return Err(SignatureError::MalformedKey(format!(
            "JWK \"{name}\" must be {len} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(encode_base64url(&bytes))
}

fn decoding_key(jwk: &Jwk, algorithm: SignatureAlgorithm) -> Result<DecodingKey, SignatureError> {
    let key = match algorithm {
        SignatureAlgorithm::Ed25519 => {
            DecodingKey::from_ed_components(&coordinate(&jwk.x, "x", 32)?)
        }
        SignatureAlgorithm::Es256 => DecodingKey::from_ec_components(
            &coordinate(&jwk.x, "x", 32)?,
            &coordinate(&jwk.y, "y", 32)?,
        ),
        SignatureAlgorithm::Es384 => DecodingKey::from_ec_components(
            &coordinate(&jwk.x, "x", 48)?,
            &coordinate(&jwk.y, "y", 48)?,
        ),
    };
    key.map_err(|e| SignatureError::MalformedKey(e.to_string()))
}
