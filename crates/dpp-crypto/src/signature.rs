//! # Raw Signature Verification
//!
//! Verifies detached signatures over arbitrary bytes with Ed25519, ECDSA
//! P-256 (SHA-256) or ECDSA P-384 (SHA-384). The hash is fixed by the curve
//! and is never configurable.
//!
//! Public keys are JWKs or raw bytes (a 32-byte Ed25519 key or a SEC1
//! point). ECDSA signatures are accepted as fixed-width `r || s` or ASN.1
//! DER.
//!
//! ## Security Invariant
//!
//! When a verification method is used, the algorithm comes from the key
//! material (see [`VerificationMethod::key_type`]). A key whose type is
//! unknown or contradictory is rejected.

use std::fmt;
use std::str::FromStr;

use dpp_core::{decode_base64url, Jwk, KeyAlgorithm};
use dpp_did::VerificationMethod;
use ed25519_dalek::Verifier as _;
use serde_json::Value;

use crate::error::SignatureError;
use crate::jws;

/// Signature algorithms supported for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// EdDSA over Ed25519.
    Ed25519,
    /// ECDSA over P-256 with SHA-256.
    Es256,
    /// ECDSA over P-384 with SHA-384.
    Es384,
}

impl SignatureAlgorithm {
    /// The algorithm that keys of the given family verify.
    pub fn for_key(key: KeyAlgorithm) -> Option<Self> {
        match key {
            KeyAlgorithm::Ed25519 => Some(Self::Ed25519),
            KeyAlgorithm::P256 => Some(Self::Es256),
            KeyAlgorithm::P384 => Some(Self::Es384),
            KeyAlgorithm::Unknown => None,
        }
    }

    /// The key family this algorithm requires.
    pub fn key_algorithm(self) -> KeyAlgorithm {
        match self {
            Self::Ed25519 => KeyAlgorithm::Ed25519,
            Self::Es256 => KeyAlgorithm::P256,
            Self::Es384 => KeyAlgorithm::P384,
        }
    }

    /// The JOSE `alg` value.
    pub fn jose_name(self) -> &'static str {
        match self {
            Self::Ed25519 => "EdDSA",
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = SignatureError;

    /// Accepts `Ed25519`/`EdDSA`, `ES256`/`P-256` and `ES384`/`P-384`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ed25519" | "EdDSA" => Ok(Self::Ed25519),
            "ES256" | "P-256" => Ok(Self::Es256),
            "ES384" | "P-384" => Ok(Self::Es384),
            other => Err(SignatureError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str("Ed25519"),
            Self::Es256 => f.write_str("ES256"),
            Self::Es384 => f.write_str("ES384"),
        }
    }
}

/// Public key input for [`SignatureVerifier::verify`].
#[derive(Debug, Clone, Copy)]
pub enum PublicKeyMaterial<'a> {
    /// A JSON Web Key.
    Jwk(&'a Jwk),
    /// Raw key bytes: 32 bytes for Ed25519, a SEC1 point for ECDSA.
    Raw(&'a [u8]),
}

impl<'a> From<&'a Jwk> for PublicKeyMaterial<'a> {
    fn from(jwk: &'a Jwk) -> Self {
        Self::Jwk(jwk)
    }
}

impl<'a> From<&'a [u8]> for PublicKeyMaterial<'a> {
    fn from(raw: &'a [u8]) -> Self {
        Self::Raw(raw)
    }
}

/// Stateless multi-algorithm signature verifier.
///
/// Every method is total: failures are logged and reported as `false` or
/// `None`, and the `try_*` variants return the cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verify `signature` over `message` with `algorithm`, one of `Ed25519`,
    /// `EdDSA`, `ES256`, `P-256`, `ES384` or `P-384`.
    pub fn verify(
        &self,
        signature: &[u8],
        message: &[u8],
        public_key: PublicKeyMaterial<'_>,
        algorithm: &str,
    ) -> bool {
        let result = algorithm
            .parse::<SignatureAlgorithm>()
            .and_then(|alg| self.try_verify(signature, message, public_key, alg));
        report(result, algorithm)
    }

    /// Verify with a parsed algorithm, returning the failure cause.
    ///
    /// # Errors
    ///
    /// Any [`SignatureError`]; [`SignatureError::Mismatch`] for a well-formed
    /// signature that does not verify.
    pub fn try_verify(
        &self,
        signature: &[u8],
        message: &[u8],
        public_key: PublicKeyMaterial<'_>,
        algorithm: SignatureAlgorithm,
    ) -> Result<(), SignatureError> {
        match algorithm {
            SignatureAlgorithm::Ed25519 => verify_ed25519(signature, message, public_key),
            SignatureAlgorithm::Es256 => verify_p256(signature, message, public_key),
            SignatureAlgorithm::Es384 => verify_p384(signature, message, public_key),
        }
    }

    /// Verify with the JWK of a verification method, using the algorithm
    /// implied by its key type.
    pub fn verify_from_method(
        &self,
        signature: &[u8],
        message: &[u8],
        method: &VerificationMethod,
    ) -> bool {
        report(
            self.try_verify_from_method(signature, message, method),
            &method.id,
        )
    }

    /// Fallible form of [`verify_from_method`](Self::verify_from_method).
    ///
    /// # Errors
    ///
    /// [`SignatureError::MissingJwk`] and [`SignatureError::UnknownKeyType`]
    /// for unusable methods, otherwise as [`try_verify`](Self::try_verify).
    pub fn try_verify_from_method(
        &self,
        signature: &[u8],
        message: &[u8],
        method: &VerificationMethod,
    ) -> Result<(), SignatureError> {
        let jwk = method
            .public_key_jwk
            .as_ref()
            .ok_or_else(|| SignatureError::MissingJwk(method.id.clone()))?;
        let algorithm = SignatureAlgorithm::for_key(method.key_type())
            .ok_or_else(|| SignatureError::UnknownKeyType(method.id.clone()))?;
        self.try_verify(signature, message, PublicKeyMaterial::Jwk(jwk), algorithm)
    }

    /// Verify a compact JWS against `jwk`. See [`jws::verify_jws`].
    pub fn verify_jws(&self, token: &str, jwk: &Jwk) -> Option<Value> {
        jws::verify_jws(token, jwk)
    }
}

/// One-shot form of [`SignatureVerifier::verify`].
pub fn verify_signature(
    signature: &[u8],
    message: &[u8],
    public_key: PublicKeyMaterial<'_>,
    algorithm: &str,
) -> bool {
    SignatureVerifier::new().verify(signature, message, public_key, algorithm)
}

fn report(result: Result<(), SignatureError>, context: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(SignatureError::Mismatch) => {
            tracing::debug!(context, "signature mismatch");
            false
        }
        Err(e) => {
            tracing::warn!(context, error = %e, "signature verification failed");
            false
        }
    }
}

fn expect_key(jwk: &Jwk, algorithm: SignatureAlgorithm) -> Result<(), SignatureError> {
    let found = jwk.key_algorithm();
    if found == algorithm.key_algorithm() {
        Ok(())
    } else {
        Err(SignatureError::KeyAlgorithmMismatch {
            expected: algorithm,
            found,
        })
    }
}

fn jwk_member<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, SignatureError> {
    value
        .as_deref()
        .ok_or_else(|| SignatureError::MalformedKey(format!("JWK has no \"{name}\"")))
}

fn verify_ed25519(
    signature: &[u8],
    message: &[u8],
    public_key: PublicKeyMaterial<'_>,
) -> Result<(), SignatureError> {
    let key_bytes = match public_key {
        PublicKeyMaterial::Jwk(jwk) => {
            expect_key(jwk, SignatureAlgorithm::Ed25519)?;
            decode_base64url(jwk_member(&jwk.x, "x")?)?
        }
        PublicKeyMaterial::Raw(raw) => raw.to_vec(),
    };
    let key_bytes: [u8; 32] = key_bytes.as_slice().try_into().map_err(|_| {
        SignatureError::MalformedKey(format!(
            "Ed25519 key must be 32 bytes, got {}",
            key_bytes.len()
        ))
    })?;
    let key = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let sig = ed25519_dalek::Signature::from_slice(signature)
        .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
    key.verify(message, &sig).map_err(|_| SignatureError::Mismatch)
}

/// Build an uncompressed SEC1 point `0x04 || x || y` from a JWK, or pass raw
/// point bytes through.
fn sec1_point(
    public_key: PublicKeyMaterial<'_>,
    algorithm: SignatureAlgorithm,
    coordinate_len: usize,
) -> Result<Vec<u8>, SignatureError> {
    match public_key {
        PublicKeyMaterial::Jwk(jwk) => {
            expect_key(jwk, algorithm)?;
            let x = decode_base64url(jwk_member(&jwk.x, "x")?)?;
            let y = decode_base64url(jwk_member(&jwk.y, "y")?)?;
            if x.len() != coordinate_len || y.len() != coordinate_len {
                return Err(SignatureError::MalformedKey(format!(
                    "{algorithm} coordinates must be {coordinate_len} bytes"
                )));
            }
            let mut point = Vec::with_capacity(1 + 2 * coordinate_len);
            point.push(0x04);
            point.extend_from_slice(&x);
            point.extend_from_slice(&y);
            Ok(point)
        }
        PublicKeyMaterial::Raw(raw) => Ok(raw.to_vec()),
    }
}

fn verify_p256(
    signature: &[u8],
    message: &[u8],
    public_key: PublicKeyMaterial<'_>,
) -> Result<(), SignatureError> {
    use p256::ecdsa::signature::Verifier;
    use p256::ecdsa::{Signature, VerifyingKey};

    let point = sec1_point(public_key, SignatureAlgorithm::Es256, 32)?;
    let key = VerifyingKey::from_sec1_bytes(&point)
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let sig = if signature.len() == 64 {
        Signature::from_slice(signature)
    } else {
        Signature::from_der(signature)
    }
    .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
    key.verify(message, &sig).map_err(|_| SignatureError::Mismatch)
}

fn verify_p384(
    signature: &[u8],
    message: &[u8],
    public_key: PublicKeyMaterial<'_>,
) -> Result<(), SignatureError> {
    use p384::ecdsa::signature::Verifier;
    use p384::ecdsa::{Signature, VerifyingKey};

    let point = sec1_point(public_key, SignatureAlgorithm::Es384, 48)?;
    let key = VerifyingKey::from_sec1_bytes(&point)
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let sig = if signature.len() == 96 {
        Signature::from_slice(signature)
    } else {
        Signature::from_der(signature)
    }
    .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
    key.verify(message, &sig).map_err(|_| SignatureError::Mismatch)
}
