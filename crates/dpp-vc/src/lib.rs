#![deny(missing_docs)]

//! # dpp-vc — Credential Proof Verification
//!
//! Checks that a Digital Product Passport credential was signed by the key
//! its issuer publishes:
//!
//! - **Verifier** (`verifier.rs`): issuer extraction, DID resolution through
//!   `dpp-did`, and proof dispatch to `dpp-crypto`. Handles embedded
//!   `Ed25519Signature2020` / `DataIntegrityProof` proofs, detached
//!   `JsonWebSignature2020` proofs and enveloped VC-JWTs.
//!
//! - **Result** (`result.rs`): [`VerificationResult`], a structured outcome
//!   with a three-valued `signature_valid`.
//!
//! - **Report** (`report.rs`): [`SignatureLayerReport`], the `VC001`/`VC002`
//!   finding view of a result.
//!
//! ## Security Invariant
//!
//! A credential with any proof whose signature definitely fails is never
//! `valid`, regardless of how many other proofs verify. An enveloped token
//! never vouches for credential members its payload does not sign.
//!
//! ## Crate Policy
//!
//! - Verification never panics and never returns `Err`; every failure is a
//!   message in the result.
//! - Structural and schema validation of the credential body are out of
//!   scope; only the signature layer lives here.

pub mod error;
pub mod proof;
pub mod report;
pub mod result;
pub mod verifier;

pub use error::{JwtFailure, ProofFailure};
pub use proof::ProofKind;
pub use report::{Severity, SignatureFinding, SignatureLayerReport};
pub use result::VerificationResult;
pub use verifier::{verify_credential, CredentialVerifier};
