//! Proof classification.

use serde_json::{Map, Value};

/// How a proof's signature is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofKind {
    /// Embedded `proofValue` over canonical verify data
    /// (`Ed25519Signature2020`, `DataIntegrityProof`).
    DataIntegrity,
    /// Detached compact JWS in `jws` (`JsonWebSignature2020`).
    JsonWebSignature,
    /// Any other proof type.
    Unsupported(String),
}

impl ProofKind {
    /// Classify a proof `type` value.
    pub fn classify(proof_type: &str) -> Self {
        match proof_type {
            "Ed25519Signature2020" | "DataIntegrityProof" => Self::DataIntegrity,
            "JsonWebSignature2020" => Self::JsonWebSignature,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// What a credential carries in the way of proofs.
#[derive(Debug, PartialEq)]
pub(crate) enum ProofShape<'a> {
    /// No proof and no enveloping token.
    Absent,
    /// An enveloped VC-JWT.
    Enveloped(&'a str),
    /// One or more embedded proof entries, in order.
    Embedded(Vec<&'a Value>),
}

impl<'a> ProofShape<'a> {
    /// Inspect `proof` (object, array, or absent) and the `jwt` fallbacks.
    pub(crate) fn of(credential: &'a Value) -> Self {
        match credential.get("proof") {
            None | Some(Value::Null) => Self::from_jwt_field(credential),
            Some(Value::Array(items)) if items.is_empty() => Self::from_jwt_field(credential),
            Some(Value::Array(items)) => Self::Embedded(items.iter().collect()),
            Some(Value::Object(map)) if map.is_empty() => Self::from_jwt_field(credential),
            Some(proof) => match proof.as_object() {
                Some(map) if !carries_signature(map) => {
                    match map.get("jwt").and_then(Value::as_str) {
                        Some(token) => Self::Enveloped(token),
                        None => Self::Embedded(vec![proof]),
                    }
                }
                _ => Self::Embedded(vec![proof]),
            },
        }
    }

    fn from_jwt_field(credential: &'a Value) -> Self {
        match credential.get("jwt").and_then(Value::as_str) {
            Some(token) => Self::Enveloped(token),
            None => Self::Absent,
        }
    }
}

/// A proof entry that signs the credential itself: it holds `proofValue` or
/// `jws`, or its `type` names an embedded proof suite.
fn carries_signature(proof: &Map<String, Value>) -> bool {
    proof.contains_key("proofValue")
        || proof.contains_key("jws")
        || proof
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| !matches!(ProofKind::classify(t), ProofKind::Unsupported(_)))
}
