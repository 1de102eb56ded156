//! # DID Documents
//!
//! [`DidDocument`] is the resolved form of a DID: its verification methods
//! and the relationships that reference them. Parsing is tolerant. A
//! verification method that cannot be parsed is skipped with a warning
//! instead of failing the whole document, and the decoded JSON is kept in
//! `raw` for audit.

use dpp_core::{Did, Jwk, KeyAlgorithm};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// The W3C DID v1 JSON-LD context.
pub const DID_V1_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// A public key published in a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// DID URL identifying this method, usually `did#fragment`.
    pub id: String,
    /// Method type, e.g. `Ed25519VerificationKey2020` or `JsonWebKey2020`.
    #[serde(rename = "type", default)]
    pub method_type: String,
    /// The DID controlling this key.
    #[serde(default)]
    pub controller: String,
    /// Key as a JSON Web Key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
    /// Key as a multibase string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
    /// Key as a bare base58 string (legacy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_base58: Option<String>,
}

impl VerificationMethod {
    /// The algorithm this key is usable with.
    ///
    /// Derived from the JWK `kty`/`crv` and from the method `type`. When both
    /// are present and disagree the key is [`KeyAlgorithm::Unknown`].
    pub fn key_type(&self) -> KeyAlgorithm {
        let hint = KeyAlgorithm::from_method_type(&self.method_type);
        match (&self.public_key_jwk, hint) {
            (Some(jwk), Some(hint)) if jwk.key_algorithm() != hint => KeyAlgorithm::Unknown,
            (Some(jwk), _) => jwk.key_algorithm(),
            (None, Some(hint)) => hint,
            (None, None) => KeyAlgorithm::Unknown,
        }
    }
}

/// A resolved DID document.
#[derive(Debug, Clone, PartialEq)]
pub struct DidDocument {
    /// The DID this document describes.
    pub id: Did,
    /// `@context` entries that are plain URIs, in order.
    pub context: Vec<String>,
    /// All verification methods, including ones embedded in relationships.
    pub verification_method: Vec<VerificationMethod>,
    /// Method ids usable for authentication.
    pub authentication: Vec<String>,
    /// Method ids usable for making assertions (signing credentials).
    pub assertion_method: Vec<String>,
    /// The decoded document as received or synthesized.
    pub raw: Value,
}

impl DidDocument {
    /// Parse a decoded JSON document.
    ///
    /// # Errors
    ///
    /// Fails if `raw` is not an object or lacks a valid string `id`.
    pub fn from_json(raw: Value) -> Result<Self, DocumentError> {
        let obj = raw.as_object().ok_or(DocumentError::NotAnObject)?;
        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .ok_or(DocumentError::MissingId)?;
        let id = Did::new(id)?;

        let context = match obj.get("@context") {
            Some(Value::String(uri)) => vec![uri.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let mut verification_method: Vec<VerificationMethod> = array(obj, "verificationMethod")
            .iter()
            .filter_map(|entry| parse_method(&id, entry))
            .collect();
        let authentication = relationship(&id, obj, "authentication", &mut verification_method);
        let assertion_method = relationship(&id, obj, "assertionMethod", &mut verification_method);

        Ok(Self {
            id,
            context,
            verification_method,
            authentication,
            assertion_method,
            raw,
        })
    }

    /// Find a verification method by id.
    ///
    /// `method_id` may be absolute (`did:web:example.com#key-1`) or relative
    /// to this document (`#key-1`). Exact matches win; otherwise the first
    /// method with the same fragment is returned.
    pub fn verification_method(&self, method_id: &str) -> Option<&VerificationMethod> {
        let target = self.absolute(method_id);
        if let Some(vm) = self
            .verification_method
            .iter()
            .find(|vm| self.absolute(&vm.id) == target)
        {
            return Some(vm);
        }

        let fragment = fragment_of(&target)?;
        self.verification_method
            .iter()
            .find(|vm| fragment_of(&vm.id) == Some(fragment))
    }

    /// Verification methods referenced by `assertionMethod`, in order.
    ///
    /// References that do not resolve within the document are skipped.
    pub fn assertion_methods(&self) -> Vec<&VerificationMethod> {
        self.assertion_method
            .iter()
            .filter_map(|id| self.verification_method(id))
            .collect()
    }

    /// The document as decoded JSON.
    pub fn to_json(&self) -> &Value {
        &self.raw
    }

    fn absolute(&self, method_id: &str) -> String {
        if method_id.starts_with('#') {
            format!("{}{method_id}", self.id)
        } else {
            method_id.to_string()
        }
    }
}

fn fragment_of(id: &str) -> Option<&str> {
    id.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn parse_method(did: &Did, entry: &Value) -> Option<VerificationMethod> {
    match serde_json::from_value::<VerificationMethod>(entry.clone()) {
        Ok(vm) => Some(vm),
        Err(e) => {
            tracing::warn!(did = %did, error = %e, "skipping malformed verification method");
            None
        }
    }
}

/// Collect a relationship's method ids. Embedded methods are added to
/// `methods` and referenced by their id.
fn relationship(
    did: &Did,
    obj: &Map<String, Value>,
    key: &str,
    methods: &mut Vec<VerificationMethod>,
) -> Vec<String> {
    let mut ids = Vec::new();
    for entry in array(obj, key) {
        match entry {
            Value::String(id) => ids.push(id.clone()),
            Value::Object(_) => {
                if let Some(vm) = parse_method(did, entry) {
                    ids.push(vm.id.clone());
                    if !methods.iter().any(|existing| existing.id == vm.id) {
                        methods.push(vm);
                    }
                }
            }
            _ => tracing::warn!(
                did = %did,
                relationship = key,
                "ignoring non-string, non-object entry"
            ),
        }
    }
    ids
}
