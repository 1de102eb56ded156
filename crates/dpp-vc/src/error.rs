//! # Proof Failures
//!
//! The `Display` text of each variant is the message placed in
//! [`VerificationResult::errors`](crate::VerificationResult::errors). These
//! strings are part of the output contract consumed by reporting layers, so
//! they are kept stable.

use thiserror::Error;

/// Why an embedded proof failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofFailure {
    /// The credential is not a JSON object.
    #[error("Credential is not a JSON object")]
    MalformedCredential,

    /// A `proof` entry is not a JSON object.
    #[error("Malformed proof entry")]
    MalformedProof,

    /// `verificationMethod` is not a DID URL.
    #[error("Could not extract DID from: {0}")]
    InvalidVerificationMethod(String),

    /// The DID did not resolve to a document.
    #[error("Could not resolve DID: {0}")]
    UnresolvableDid(String),

    /// The resolved document has no matching verification method.
    #[error("Verification method not found: {0}")]
    VerificationMethodNotFound(String),

    /// The signature did not verify.
    #[error("Signature verification failed")]
    SignatureMismatch,
}

/// Why an enveloped VC-JWT failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtFailure {
    /// Neither `jwt` nor `proof.jwt` holds a token.
    #[error("No JWT token found in credential")]
    MissingToken,

    /// The token header cannot be decoded.
    #[error("Invalid JWT format: {0}")]
    InvalidFormat(String),

    /// Neither the credential nor the token payload names an issuer.
    #[error("Cannot extract issuer DID for JWT verification")]
    MissingIssuer,

    /// The issuer DID did not resolve.
    #[error("Failed to resolve issuer DID: {0}")]
    UnresolvableIssuer(String),

    /// The issuer document has no verification method with a JWK.
    #[error("No suitable verification method with JWK found")]
    NoUsableMethod,

    /// The token signature did not verify.
    #[error("JWT signature verification failed")]
    SignatureMismatch,

    /// The credential names an issuer the signed payload does not.
    #[error("Credential issuer {credential} does not match JWT issuer {token}")]
    IssuerMismatch {
        /// Issuer named by the credential.
        credential: String,
        /// `iss` of the signed payload.
        token: String,
    },

    /// A credential member is absent from, or differs in, the signed payload.
    #[error("Credential member \"{0}\" is not covered by the signed JWT payload")]
    UnsignedClaim(String),
}
