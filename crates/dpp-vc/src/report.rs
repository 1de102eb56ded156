//! # Signature Layer Report
//!
//! Maps a [`VerificationResult`] onto the finding format used by validation
//! reports. Errors become `VC001` findings, warnings `VC002`, all anchored
//! at `$.proof`.

use serde::Serialize;

use crate::result::VerificationResult;

/// Base URL of the per-code error documentation.
pub const DOCS_BASE_URL: &str = "https://artiso-ai.github.io/dppvalidator/errors";

/// JSON path every signature finding points at.
pub const PROOF_PATH: &str = "$.proof";

/// Finding code for a signature-layer error.
pub const ERROR_CODE: &str = "VC001";

/// Finding code for a signature-layer warning.
pub const WARNING_CODE: &str = "VC002";

const ERROR_SUGGESTION: &str = "Check issuer DID and proof signature";

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Invalidates the credential.
    Error,
    /// Informational; the credential stays valid.
    Warning,
}

/// One reportable message from signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureFinding {
    /// JSON path of the offending part, always [`PROOF_PATH`].
    pub path: &'static str,
    /// [`ERROR_CODE`] or [`WARNING_CODE`].
    pub code: &'static str,
    /// Error or warning.
    pub severity: Severity,
    /// The verifier's message.
    pub message: String,
    /// Remediation hint. Errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
    /// Documentation page for `code`. Errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
}

impl SignatureFinding {
    fn error(message: &str) -> Self {
        Self {
            path: PROOF_PATH,
            code: ERROR_CODE,
            severity: Severity::Error,
            message: message.to_string(),
            suggestion: Some(ERROR_SUGGESTION),
            docs_url: Some(docs_url(ERROR_CODE)),
        }
    }

    fn warning(message: &str) -> Self {
        Self {
            path: PROOF_PATH,
            code: WARNING_CODE,
            severity: Severity::Warning,
            message: message.to_string(),
            suggestion: None,
            docs_url: None,
        }
    }
}

/// Signature-layer section of a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureLayerReport {
    /// `true` when the result is valid and produced no errors.
    pub valid: bool,
    /// Aggregate signature outcome; `None` when undetermined.
    pub signature_valid: Option<bool>,
    /// Issuer DID of the credential.
    pub issuer_did: Option<String>,
    /// Verification method of the last proof examined.
    pub verification_method: Option<String>,
    /// Error findings first, then warnings, each in original order.
    pub findings: Vec<SignatureFinding>,
}

impl SignatureLayerReport {
    /// Findings with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &SignatureFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    /// Findings with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &SignatureFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }
}

impl From<&VerificationResult> for SignatureLayerReport {
    fn from(result: &VerificationResult) -> Self {
        let findings = result
            .errors()
            .iter()
            .map(|m| SignatureFinding::error(m))
            .chain(result.warnings().iter().map(|m| SignatureFinding::warning(m)))
            .collect();
        Self {
            valid: result.valid() && result.errors().is_empty(),
            signature_valid: result.signature_valid(),
            issuer_did: result.issuer_did().map(str::to_string),
            verification_method: result.verification_method().map(str::to_string),
            findings,
        }
    }
}

/// Documentation URL for a finding code.
pub fn docs_url(code: &str) -> String {
    format!("{DOCS_BASE_URL}/{code}")
}
