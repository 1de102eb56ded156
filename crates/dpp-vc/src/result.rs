//! Verification outcome.

use std::fmt;

use serde::Serialize;

/// Outcome of verifying one credential.
///
/// Built by [`CredentialVerifier`](crate::CredentialVerifier); read-only
/// once returned.
///
/// `valid` is `false` when something is definitely wrong (a signature
/// failed, the issuer could not be resolved). `signature_valid` is
/// three-valued: `Some(true)` when every proof verified, `Some(false)` when
/// any proof failed, `None` when verification was not possible or not
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    valid: bool,
    signature_valid: Option<bool>,
    issuer_did: Option<String>,
    verification_method: Option<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl VerificationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            signature_valid: None,
            issuer_did: None,
            verification_method: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// `false` if any check definitely failed.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Aggregate signature outcome.
    pub fn signature_valid(&self) -> Option<bool> {
        self.signature_valid
    }

    /// Issuer DID taken from the credential (or token payload).
    pub fn issuer_did(&self) -> Option<&str> {
        self.issuer_did.as_deref()
    }

    /// Verification method of the last proof examined.
    pub fn verification_method(&self) -> Option<&str> {
        self.verification_method.as_deref()
    }

    /// Human-readable failures. Non-empty implies `!valid()`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Human-readable notices that do not affect `valid`.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// `true` only when valid and every signature verified.
    pub fn verified(&self) -> bool {
        self.valid && self.signature_valid == Some(true)
    }

    pub(crate) fn fail(&mut self, error: impl fmt::Display) {
        self.valid = false;
        self.errors.push(error.to_string());
    }

    pub(crate) fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub(crate) fn set_signature_valid(&mut self, signature_valid: Option<bool>) {
        self.signature_valid = signature_valid;
    }

    pub(crate) fn set_issuer_did(&mut self, issuer_did: Option<String>) {
        self.issuer_did = issuer_did;
    }

    pub(crate) fn set_verification_method(&mut self, verification_method: impl Into<String>) {
        self.verification_method = Some(verification_method.into());
    }
}

/// Three-valued AND over per-proof outcomes: any `false` is `false`, all
/// `true` is `true`, anything else (including no outcomes) is `None`.
pub(crate) fn all_verified(outcomes: &[Option<bool>]) -> Option<bool> {
    if outcomes.contains(&Some(false)) {
        Some(false)
    } else if !outcomes.is_empty() && outcomes.iter().all(|o| *o == Some(true)) {
        Some(true)
    } else {
        None
    }
}
