//! # JSON Web Keys and Key Algorithms
//!
//! [`Jwk`] carries the public-key members of an RFC 7517 JSON Web Key as
//! published in DID documents. Unknown members are ignored; every member is
//! optional so that a malformed key still parses and is later classified as
//! [`KeyAlgorithm::Unknown`] instead of breaking document parsing.
//!
//! [`KeyAlgorithm`] is the single place where key material is mapped to a
//! signature algorithm. Nothing downstream inspects `kty`/`crv` strings.

use serde::{Deserialize, Serialize};

/// Public-key members of a JSON Web Key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type (`OKP`, `EC`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    /// Curve name (`Ed25519`, `P-256`, `P-384`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// Public key (OKP) or x coordinate (EC), base64url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// y coordinate (EC), base64url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Declared algorithm. Informational only, never used for dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

impl Jwk {
    /// An Ed25519 (`OKP`) key with the given base64url-encoded public key.
    pub fn ed25519(x: impl Into<String>) -> Self {
        Self {
            kty: Some("OKP".to_string()),
            crv: Some("Ed25519".to_string()),
            x: Some(x.into()),
            ..Self::default()
        }
    }

    /// An EC key on the named curve with base64url-encoded coordinates.
    pub fn ec(crv: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kty: Some("EC".to_string()),
            crv: Some(crv.into()),
            x: Some(x.into()),
            y: Some(y.into()),
            ..Self::default()
        }
    }

    /// The algorithm implied by `kty` and `crv`.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::from_kty_crv(self.kty.as_deref(), self.crv.as_deref())
    }
}

/// Signature algorithm family implied by a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// EdDSA over Curve25519.
    Ed25519,
    /// ECDSA over NIST P-256 with SHA-256 (ES256).
    #[serde(rename = "P-256")]
    P256,
    /// ECDSA over NIST P-384 with SHA-384 (ES384).
    #[serde(rename = "P-384")]
    P384,
    /// Unsupported, missing, or contradictory key material.
    Unknown,
}

impl KeyAlgorithm {
    /// Classify a JWK `kty`/`crv` pair.
    pub fn from_kty_crv(kty: Option<&str>, crv: Option<&str>) -> Self {
        match (kty, crv) {
            (Some("OKP"), Some("Ed25519")) => Self::Ed25519,
            (Some("EC"), Some("P-256")) => Self::P256,
            (Some("EC"), Some("P-384")) => Self::P384,
            _ => Self::Unknown,
        }
    }

    /// The algorithm implied by a verification method `type`, if any.
    ///
    /// Generic containers such as `JsonWebKey2020` or `Multikey` imply nothing.
    pub fn from_method_type(method_type: &str) -> Option<Self> {
        match method_type {
            "Ed25519VerificationKey2020" | "Ed25519VerificationKey2018" => Some(Self::Ed25519),
            "EcdsaSecp256r1VerificationKey2019" => Some(Self::P256),
            _ => None,
        }
    }

    /// Returns `true` for every variant except [`KeyAlgorithm::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The JOSE `alg` identifier for this key family.
    pub fn jose_name(&self) -> Option<&'static str> {
        match self {
            Self::Ed25519 => Some("EdDSA"),
            Self::P256 => Some("ES256"),
            Self::P384 => Some("ES384"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::P256 => write!(f, "P-256"),
            Self::P384 => write!(f, "P-384"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
