//! # Decentralized Identifiers
//!
//! The [`Did`] newtype validates the generic W3C DID syntax at construction
//! time: `did:<method>:<method-specific-id>` where the method is lowercase
//! alphanumeric and the method-specific identifier is non-empty.
//!
//! Method-specific syntax (what a valid `did:web` domain or `did:key`
//! multibase value looks like) is checked by the resolver, not here.
//!
//! Reference: <https://www.w3.org/TR/did-core/#did-syntax>

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A W3C Decentralized Identifier.
///
/// Serializes as its plain string form. Deserialization validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Extract the DID from a DID URL such as `did:key:z6Mk...#z6Mk...`.
    ///
    /// The fragment (`#...`), query (`?...`) and path (`/...`) components are
    /// removed before validation.
    pub fn from_did_url(did_url: &str) -> Result<Self, ValidationError> {
        let end = did_url.find(['#', '?', '/']).unwrap_or(did_url.len());
        Self::new(&did_url[..end])
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidDid(s.to_string());
        let rest = s.strip_prefix("did:").ok_or_else(invalid)?;
        let (method, identifier) = rest.split_once(':').ok_or_else(invalid)?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if identifier.is_empty() || identifier.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        self.split().0
    }

    /// Return the method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.0
            .get(4..)
            .and_then(|rest| rest.split_once(':'))
            .unwrap_or(("", ""))
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Did {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}
