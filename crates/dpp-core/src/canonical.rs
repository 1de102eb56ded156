//! # Verify-Data Canonicalization
//!
//! This module defines [`VerifyData`], the byte string an embedded credential
//! proof signs. Its inner `Vec<u8>` is private: the only construction path is
//! [`VerifyData::new()`], which applies the canonicalization below.
//!
//! ## Algorithm
//!
//! 1. Remove `proof` from the credential.
//! 2. Remove `proofValue` from the proof object (the remainder are the
//!    "proof options").
//! 3. Serialize each with object keys sorted by code point at every depth,
//!    compact separators, and every character outside printable ASCII
//!    escaped as `\uXXXX` (UTF-16 code units, lowercase hex).
//! 4. Concatenate proof-options JSON then credential JSON, UTF-8 encoded.
//!
//! This is the sorted-key JSON scheme used by the issuers this verifier
//! interoperates with. It is NOT RDF Dataset Canonicalization (URDNA2015)
//! and does not produce the bytes a W3C Data Integrity conformant signer
//! would. Changing it would break existing signatures, so it stays as is.

use std::io;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes covered by an embedded proof signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifyData(Vec<u8>);

impl VerifyData {
    /// Build the verify data for `proof` attached to `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::NotAnObject`] if either value is not
    /// a JSON object.
    pub fn new(credential: &Value, proof: &Value) -> Result<Self, CanonicalizationError> {
        let credential = without_key(credential, "proof")?;
        let proof_options = without_key(proof, "proofValue")?;

        let mut bytes = canonical_json(&proof_options)?.into_bytes();
        bytes.extend_from_slice(canonical_json(&credential)?.as_bytes());
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for VerifyData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize a JSON value with sorted keys, compact separators and ASCII-only
/// output.
pub fn canonical_json(value: &Value) -> Result<String, CanonicalizationError> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    Sorted(value).serialize(&mut serializer)?;
    // The formatter only ever writes ASCII.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn without_key(value: &Value, key: &str) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Object(map) => {
            let mut copy = map.clone();
            copy.remove(key);
            Ok(Value::Object(copy))
        }
        other => Err(CanonicalizationError::NotAnObject(json_type_name(other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializes a [`Value`] with object keys in sorted order regardless of the
/// map implementation serde_json was compiled with.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    out.serialize_entry(k, &Sorted(v))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Sorted(item))?;
                }
                out.end()
            }
            other => other.serialize(serializer),
        }
    }
}

/// Compact formatter that escapes everything outside printable ASCII.
struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
