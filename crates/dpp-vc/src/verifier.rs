//! # Credential Verifier
//!
//! Ties a credential's proofs to keys published by the issuer's DID and
//! produces a [`VerificationResult`].
//!
//! ## Flow
//!
//! 1. Extract the issuer (`issuer` string, or `issuer.id`).
//! 2. Classify the proof shape: embedded proof(s), enveloped VC-JWT, or none.
//! 3. For each embedded proof: DID from `verificationMethod`, resolve,
//!    locate the method, dispatch on [`ProofKind`].
//! 4. Aggregate with a three-valued AND. A failed signature makes the
//!    credential invalid; an undetermined one only adds a warning.
//!
//! Proofs are verified one after another. Nothing here returns an error or
//! panics: every failure becomes a message in the result.
//!
//! ## Binding
//!
//! - Embedded proofs sign the canonical credential, so the body is covered.
//!   A `verificationMethod` whose DID differs from the issuer only warns.
//! - An enveloped token found inside a credential must cover every member
//!   around it: each is compared with the signed `vc` claim (or the payload
//!   when there is no `vc`), and the credential issuer must equal `iss`.
//! - A `JsonWebSignature2020` proof only proves that the method's key signed
//!   the `jws`. Its payload is not compared with the credential, so it does
//!   not authenticate the credential's content.

use std::sync::Arc;

use dpp_core::{decode_base58btc, decode_base64, decode_base64url, Did, VerifyData};
use dpp_crypto::SignatureVerifier;
use dpp_did::{
    DidDocument, DidResolver, DocumentFetcher, HttpsFetcher, ResolutionError, ResolverConfig,
    VerificationMethod,
};
use serde_json::{Map, Value};

use crate::error::{JwtFailure, ProofFailure};
use crate::proof::{ProofKind, ProofShape};
use crate::result::{all_verified, VerificationResult};

/// Verifies credential proofs against keys resolved from issuer DIDs.
#[derive(Debug)]
pub struct CredentialVerifier<F = HttpsFetcher> {
    resolver: Arc<DidResolver<F>>,
    signatures: SignatureVerifier,
}

impl<F> Clone for CredentialVerifier<F> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            signatures: self.signatures,
        }
    }
}

impl CredentialVerifier<HttpsFetcher> {
    /// Create a verifier with its own HTTPS resolver.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        Ok(Self::with_resolver(Arc::new(DidResolver::new(config)?)))
    }
}

impl<F: DocumentFetcher> CredentialVerifier<F> {
    /// Create a verifier sharing an existing resolver (and its cache).
    pub fn with_resolver(resolver: Arc<DidResolver<F>>) -> Self {
        Self {
            resolver,
            signatures: SignatureVerifier::new(),
        }
    }

    /// The resolver used for issuer DIDs.
    pub fn resolver(&self) -> &Arc<DidResolver<F>> {
        &self.resolver
    }

    /// Verify a credential.
    pub async fn verify(&self, credential: &Value) -> VerificationResult {
        let mut result = VerificationResult::new();
        if !credential.is_object() {
            result.fail(ProofFailure::MalformedCredential);
            return result;
        }

        let issuer = extract_issuer(credential);
        result.set_issuer_did(issuer.clone());

        match ProofShape::of(credential) {
            ProofShape::Absent => result.warn("No proof found in credential"),
            ProofShape::Enveloped(token) => {
                let body = envelope_body(credential);
                self.verify_enveloped(token, issuer, body.as_ref(), &mut result).await;
            }
            ProofShape::Embedded(proofs) => {
                let mut outcomes = Vec::with_capacity(proofs.len());
                for proof in proofs {
                    let outcome = self
                        .verify_proof(credential, issuer.as_deref(), proof, &mut result)
                        .await;
                    outcomes.push(outcome);
                }
                result.set_signature_valid(all_verified(&outcomes));
            }
        }
        result
    }

    /// Verify an enveloped VC-JWT given as a compact token.
    ///
    /// The issuer is taken from the token payload's `iss`.
    pub async fn verify_jwt(&self, token: &str) -> VerificationResult {
        let mut result = VerificationResult::new();
        self.verify_enveloped(token, None, None, &mut result).await;
        result
    }

    /// Verify one embedded proof entry. Returns its signature outcome.
    async fn verify_proof(
        &self,
        credential: &Value,
        issuer: Option<&str>,
        proof: &Value,
        result: &mut VerificationResult,
    ) -> Option<bool> {
        let Some(entry) = proof.as_object() else {
            result.fail(ProofFailure::MalformedProof);
            return None;
        };
        let proof_type = str_field(entry, "type").unwrap_or_default();
        let method_ref = str_field(entry, "verificationMethod").unwrap_or_default();
        result.set_verification_method(method_ref);

        let did = match did_of(method_ref) {
            Some(did) => did,
            None => {
                result.fail(ProofFailure::InvalidVerificationMethod(method_ref.to_string()));
                return None;
            }
        };
        if let Some(issuer) = issuer.filter(|issuer| *issuer != did.as_str()) {
            tracing::warn!(%did, issuer, "proof signed by a DID other than the issuer");
            result.warn(format!("Verification method DID {did} does not match issuer {issuer}"));
        }
        let Some(doc) = self.resolver.resolve(did.as_str()).await else {
            result.fail(ProofFailure::UnresolvableDid(did.to_string()));
            return None;
        };
        let Some(method) = doc.verification_method(method_ref) else {
            result.fail(ProofFailure::VerificationMethodNotFound(method_ref.to_string()));
            return None;
        };

        let outcome = match ProofKind::classify(proof_type) {
            ProofKind::DataIntegrity => {
                self.verify_embedded(credential, proof, entry, method, result)
            }
            ProofKind::JsonWebSignature => self.verify_detached_jws(entry, method, result),
            ProofKind::Unsupported(other) => {
                result.warn(format!("Unsupported proof type: {other}"));
                None
            }
        };
        if outcome == Some(false) {
            result.fail(ProofFailure::SignatureMismatch);
        }
        outcome
    }

    /// `proofValue` over canonical verify data.
    fn verify_embedded(
        &self,
        credential: &Value,
        proof: &Value,
        entry: &Map<String, Value>,
        method: &VerificationMethod,
        result: &mut VerificationResult,
    ) -> Option<bool> {
        let Some(proof_value) = str_field(entry, "proofValue").filter(|v| !v.is_empty()) else {
            result.warn("Proof has no proofValue");
            return None;
        };
        let signature = match proof_value.strip_prefix('z') {
            Some(base58) => decode_base58btc(base58),
            None => decode_base64(proof_value),
        };
        let signature = match signature {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => {
                result.warn("Could not decode proofValue: empty signature");
                return None;
            }
            Err(e) => {
                tracing::warn!(method = %method.id, error = %e, "undecodable proofValue");
                result.warn(format!("Could not decode proofValue: {e}"));
                return None;
            }
        };
        let data = match VerifyData::new(credential, proof) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(method = %method.id, error = %e, "failed to build verify data");
                result.warn(format!("Could not canonicalize credential: {e}"));
                return None;
            }
        };
        Some(self.signatures.verify_from_method(&signature, data.as_bytes(), method))
    }

    /// Compact JWS in `jws`, verified with the method's JWK. The JWS payload
    /// is not compared with the credential.
    fn verify_detached_jws(
        &self,
        entry: &Map<String, Value>,
        method: &VerificationMethod,
        result: &mut VerificationResult,
    ) -> Option<bool> {
        let Some(jws) = str_field(entry, "jws").filter(|v| !v.is_empty()) else {
            result.warn("Proof has no jws");
            return None;
        };
        let Some(jwk) = method.public_key_jwk.as_ref() else {
            result.warn(format!("Verification method {} has no publicKeyJwk", method.id));
            return None;
        };
        Some(self.signatures.verify_jws(jws, jwk).is_some())
    }

    /// Enveloped VC-JWT. Every failure is a definite signature failure.
    ///
    /// `body` is the credential around the token, when there is one; the
    /// verified payload must cover it.
    async fn verify_enveloped(
        &self,
        token: &str,
        issuer: Option<String>,
        body: Option<&Map<String, Value>>,
        result: &mut VerificationResult,
    ) {
        match self.try_verify_enveloped(token, issuer, body, result).await {
            Ok(()) => result.set_signature_valid(Some(true)),
            Err(failure) => {
                result.set_signature_valid(Some(false));
                result.fail(failure);
            }
        }
    }

    async fn try_verify_enveloped(
        &self,
        token: &str,
        issuer: Option<String>,
        body: Option<&Map<String, Value>>,
        result: &mut VerificationResult,
    ) -> Result<(), JwtFailure> {
        if token.is_empty() {
            return Err(JwtFailure::MissingToken);
        }
        let header = jsonwebtoken::decode_header(token)
            .map_err(|e| JwtFailure::InvalidFormat(e.to_string()))?;

        let issuer = issuer
            .or_else(|| unverified_issuer(token))
            .ok_or(JwtFailure::MissingIssuer)?;
        result.set_issuer_did(Some(issuer.clone()));

        let doc = self
            .resolver
            .resolve(&issuer)
            .await
            .ok_or_else(|| JwtFailure::UnresolvableIssuer(issuer.clone()))?;

        let method =
            select_jwt_method(&doc, header.kid.as_deref()).ok_or(JwtFailure::NoUsableMethod)?;
        let jwk = method.public_key_jwk.as_ref().ok_or(JwtFailure::NoUsableMethod)?;
        result.set_verification_method(method.id.as_str());

        let claims = self
            .signatures
            .verify_jws(token, jwk)
            .ok_or(JwtFailure::SignatureMismatch)?;
        if let Some(body) = body {
            if let Err(failure) = check_envelope(body, &claims) {
                tracing::warn!(%issuer, %failure, "token does not cover credential");
                return Err(failure);
            }
        }
        Ok(())
    }
}

/// Verify a credential with a default-configured verifier.
///
/// Builds a fresh resolver per call; hold a [`CredentialVerifier`] to share
/// the resolver cache across credentials.
pub async fn verify_credential(credential: &Value) -> VerificationResult {
    match CredentialVerifier::new(&ResolverConfig::default()) {
        Ok(verifier) => verifier.verify(credential).await,
        Err(e) => {
            tracing::warn!(error = %e, "could not initialize DID resolver");
            let mut result = VerificationResult::new();
            result.set_issuer_did(extract_issuer(credential));
            result.fail(format!("Could not initialize DID resolver: {e}"));
            result
        }
    }
}

/// The issuer DID, from `issuer` as a string or `issuer.id`.
fn extract_issuer(credential: &Value) -> Option<String> {
    credential.get("issuer").and_then(issuer_id)
}

fn issuer_id(issuer: &Value) -> Option<String> {
    match issuer {
        Value::String(issuer) => Some(issuer.clone()),
        Value::Object(issuer) => str_field(issuer, "id").map(str::to_string),
        _ => None,
    }
}

/// The credential members around an enveloped token, without the carriers.
fn envelope_body(credential: &Value) -> Option<Map<String, Value>> {
    let mut body = credential.as_object()?.clone();
    body.remove("jwt");
    body.remove("proof");
    Some(body)
}

/// Every member of `body` must appear unchanged in the signed credential
/// (`vc`, or the payload itself). A bare issuer may instead be covered by
/// `iss`, which must agree with the credential issuer whenever both exist.
fn check_envelope(body: &Map<String, Value>, claims: &Value) -> Result<(), JwtFailure> {
    let signed = claims.get("vc").filter(|vc| vc.is_object()).unwrap_or(claims);
    let iss = claims.get("iss").and_then(Value::as_str);

    if let (Some(credential), Some(token)) = (body.get("issuer").and_then(issuer_id), iss) {
        if credential != token {
            return Err(JwtFailure::IssuerMismatch {
                credential,
                token: token.to_string(),
            });
        }
    }
    for (name, value) in body {
        if signed.get(name) == Some(value) {
            continue;
        }
        let bare_issuer = name == "issuer"
            && iss.is_some()
            && match value {
                Value::String(_) => true,
                Value::Object(issuer) => issuer.len() == 1 && str_field(issuer, "id").is_some(),
                _ => false,
            };
        if !bare_issuer {
            return Err(JwtFailure::UnsignedClaim(name.clone()));
        }
    }
    Ok(())
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// The DID part of a `did:` URL, `None` for anything else.
fn did_of(method_ref: &str) -> Option<Did> {
    if !method_ref.starts_with("did:") {
        return None;
    }
    Did::from_did_url(method_ref).ok()
}

/// `iss` from the token payload, read without verifying the signature.
fn unverified_issuer(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let claims: Value = serde_json::from_slice(&decode_base64url(payload).ok()?).ok()?;
    claims.get("iss")?.as_str().map(str::to_string)
}

/// Method named by `kid`, else the first assertion method, else the first
/// method, as long as it carries a JWK.
fn select_jwt_method<'a>(
    doc: &'a DidDocument,
    kid: Option<&str>,
) -> Option<&'a VerificationMethod> {
    kid.and_then(|kid| doc.verification_method(kid))
        .or_else(|| doc.assertion_methods().into_iter().next())
        .or_else(|| doc.verification_method.first())
        .filter(|method| method.public_key_jwk.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_core::{encode_base64url, encode_multibase, Jwk};
    use ed25519_dalek::Signer as _;
    use rand_core::OsRng;
    use serde_json::json;
    use std::collections::HashMap;
    use url::Url;

    /// Serves fixed did:web documents keyed by URL.
    #[derive(Default)]
    struct StaticFetcher(HashMap<String, Value>);

    impl DocumentFetcher for StaticFetcher {
        async fn fetch(&self, url: &Url) -> Result<Value, ResolutionError> {
            self.0.get(url.as_str()).cloned().ok_or(ResolutionError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn verifier(fetcher: StaticFetcher) -> CredentialVerifier<StaticFetcher> {
        CredentialVerifier::with_resolver(Arc::new(DidResolver::with_fetcher(
            fetcher,
            &ResolverConfig::default(),
        )))
    }

    fn did_key(sk: &ed25519_dalek::SigningKey) -> String {
        let mut bytes = vec![0xed, 0x01];
        bytes.extend_from_slice(sk.verifying_key().as_bytes());
        format!("did:key:{}", encode_multibase(&bytes))
    }

    /// Sign `credential` with a did:key Data Integrity proof.
    fn sign(credential: &Value, sk: &ed25519_dalek::SigningKey) -> Value {
        let did = did_key(sk);
        let suffix = did.trim_start_matches("did:key:").to_string();
        let mut proof = json!({
            "type": "Ed25519Signature2020",
            "created": "2026-01-01T00:00:00Z",
            "verificationMethod": format!("{did}#{suffix}"),
            "proofPurpose": "assertionMethod",
        });
        let data = VerifyData::new(credential, &proof).unwrap();
        let sig = sk.sign(data.as_bytes()).to_bytes();
        proof["proofValue"] = json!(encode_multibase(&sig));
        proof
    }

    fn credential(issuer: &str) -> Value {
        json!({
            "@context": ["https://www.w3.org/ns/credentials/v2"],
            "type": ["VerifiableCredential", "DigitalProductPassport"],
            "issuer": {"id": issuer, "name": "Acme Ltd"},
            "credentialSubject": {"id": "urn:uuid:1", "product": {"name": "Widget ✓"}}
        })
    }

    fn signed_credential(sk: &ed25519_dalek::SigningKey) -> Value {
        let mut vc = credential(&did_key(sk));
        vc["proof"] = sign(&vc, sk);
        vc
    }

    fn jwt(sk: &ed25519_dalek::SigningKey, header: Value, payload: Value) -> String {
        let input = format!(
            "{}.{}",
            encode_base64url(header.to_string().as_bytes()),
            encode_base64url(payload.to_string().as_bytes())
        );
        let sig = sk.sign(input.as_bytes()).to_bytes();
        format!("{input}.{}", encode_base64url(&sig))
    }

    fn web_document(did: &str, sk: &ed25519_dalek::SigningKey) -> Value {
        json!({
            "id": did,
            "verificationMethod": [{
                "id": format!("{did}#key-1"),
                "type": "JsonWebKey2020",
                "controller": did,
                "publicKeyJwk": Jwk::ed25519(encode_base64url(sk.verifying_key().as_bytes()))
            }],
            "assertionMethod": [format!("{did}#key-1")]
        })
    }

    #[tokio::test]
    async fn no_proof_is_valid_with_warning() {
        let result = verifier(StaticFetcher::default()).verify(&json!({})).await;
        assert!(result.valid());
        assert_eq!(result.signature_valid(), None);
        assert_eq!(result.warnings(), ["No proof found in credential"]);
        assert!(!result.verified());
    }

    #[tokio::test]
    async fn non_object_credential_is_invalid() {
        let result = verifier(StaticFetcher::default()).verify(&json!([1])).await;
        assert!(!result.valid());
        assert_eq!(result.errors(), ["Credential is not a JSON object"]);
    }

    #[tokio::test]
    async fn issuer_shapes() {
        let v = verifier(StaticFetcher::default());
        let result = v.verify(&json!({"issuer": "did:web:example.com"})).await;
        assert_eq!(result.issuer_did(), Some("did:web:example.com"));
        let result = v.verify(&json!({"issuer": {"id": "did:web:example.com"}})).await;
        assert_eq!(result.issuer_did(), Some("did:web:example.com"));
        let result = v.verify(&json!({"issuer": 42})).await;
        assert_eq!(result.issuer_did(), None);
        assert!(result.valid());
    }

    #[tokio::test]
    async fn valid_did_key_proof_verifies() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let vc = signed_credential(&sk);
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.verified(), "{result:?}");
        assert!(result.errors().is_empty());
        assert_eq!(
            result.verification_method(),
            vc["proof"]["verificationMethod"].as_str()
        );
    }

    #[tokio::test]
    async fn tampered_credential_fails() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let mut vc = signed_credential(&sk);
        vc["credentialSubject"]["product"]["name"] = json!("Counterfeit");
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(!result.valid());
        assert_eq!(result.signature_valid(), Some(false));
        assert_eq!(result.errors(), ["Signature verification failed"]);
    }

    #[tokio::test]
    async fn base64_proof_value_is_accepted() {
        use base64::Engine as _;
        // A leading 'z' would be read as multibase, so retry until it is absent.
        let (vc, encoded) = loop {
            let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
            let vc = signed_credential(&sk);
            let multibase = vc["proof"]["proofValue"].as_str().unwrap();
            let raw = decode_base58btc(&multibase[1..]).unwrap();
            let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
            if !encoded.starts_with('z') {
                break (vc, encoded);
            }
        };
        let mut vc = vc;
        vc["proof"]["proofValue"] = json!(encoded);
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.verified(), "{result:?}");
    }

    #[tokio::test]
    async fn proof_failures_are_reported() {
        let v = verifier(StaticFetcher::default());

        let proof = |method: String| {
            json!({"proof": {"type": "Ed25519Signature2020", "verificationMethod": method}})
        };

        let result = v.verify(&proof("#key-1".into())).await;
        assert_eq!(result.errors(), ["Could not extract DID from: #key-1"]);

        let result = v.verify(&proof("did:web:nowhere.example#k".into())).await;
        assert_eq!(result.errors(), ["Could not resolve DID: did:web:nowhere.example"]);

        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = did_key(&sk);
        let result = v.verify(&proof(format!("{did}#other"))).await;
        assert_eq!(result.errors(), [format!("Verification method not found: {did}#other")]);

        let result = v.verify(&json!({"proof": [42]})).await;
        assert_eq!(result.errors(), ["Malformed proof entry"]);
        assert!(!result.valid());
        assert_eq!(result.signature_valid(), None);
    }

    #[tokio::test]
    async fn unsupported_proof_type_is_a_warning() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let mut vc = signed_credential(&sk);
        vc["proof"]["type"] = json!("BbsBlsSignature2020");
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.valid());
        assert_eq!(result.signature_valid(), None);
        assert_eq!(result.warnings(), ["Unsupported proof type: BbsBlsSignature2020"]);
    }

    #[tokio::test]
    async fn missing_proof_value_is_undetermined() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let mut vc = signed_credential(&sk);
        vc["proof"].as_object_mut().unwrap().remove("proofValue");
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.valid());
        assert_eq!(result.signature_valid(), None);
        assert_eq!(result.warnings(), ["Proof has no proofValue"]);

        vc["proof"]["proofValue"] = json!("z0OIl");
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.valid());
        assert_eq!(result.signature_valid(), None);
        assert!(result.warnings()[0].starts_with("Could not decode proofValue"));
    }

    #[tokio::test]
    async fn one_bad_proof_invalidates_the_credential() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let other = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let vc = credential(&did_key(&sk));
        let good = sign(&vc, &sk);
        let mut bad = sign(&vc, &other);
        // Claim the first key but carry the second key's signature.
        bad["verificationMethod"] = good["verificationMethod"].clone();

        let mut two = vc.clone();
        two["proof"] = json!([good, bad]);
        let result = verifier(StaticFetcher::default()).verify(&two).await;
        assert!(!result.valid());
        assert_eq!(result.signature_valid(), Some(false));
        assert_eq!(result.errors(), ["Signature verification failed"]);
    }

    #[tokio::test]
    async fn json_web_signature_proof_uses_method_jwk() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        let token = jwt(&sk, json!({"alg": "EdDSA"}), json!({"sub": "passport"}));
        let vc = json!({
            "issuer": did,
            "proof": {
                "type": "JsonWebSignature2020",
                "verificationMethod": format!("{did}#key-1"),
                "jws": token
            }
        });
        let result = verifier(fetcher).verify(&vc).await;
        assert!(result.verified(), "{result:?}");
    }

    #[tokio::test]
    async fn proof_from_a_key_outside_the_issuer_warns() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let mut vc = credential("did:web:acme.example");
        vc["proof"] = sign(&vc, &sk);
        let result = verifier(StaticFetcher::default()).verify(&vc).await;
        assert!(result.verified(), "{result:?}");
        assert_eq!(
            result.warnings(),
            [format!(
                "Verification method DID {} does not match issuer did:web:acme.example",
                did_key(&sk)
            )]
        );
    }

    #[tokio::test]
    async fn detached_jws_payload_is_not_compared() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        // The JWS signs something unrelated to the credential body.
        let token = jwt(&sk, json!({"alg": "EdDSA"}), json!({"unrelated": true}));
        let vc = json!({
            "issuer": did,
            "credentialSubject": {"product": "Anything"},
            "proof": {
                "type": "JsonWebSignature2020",
                "verificationMethod": format!("{did}#key-1"),
                "jws": token
            }
        });
        let result = verifier(fetcher).verify(&vc).await;
        assert!(result.verified(), "{result:?}");
    }

    #[tokio::test]
    async fn enveloped_jwt_verifies_with_kid() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        let v = verifier(fetcher);

        let token = jwt(
            &sk,
            json!({"alg": "EdDSA", "kid": format!("{did}#key-1")}),
            json!({"iss": did, "vc": {"type": ["VerifiableCredential"]}}),
        );
        let result = v.verify_jwt(&token).await;
        assert!(result.verified(), "{result:?}");
        assert_eq!(result.issuer_did(), Some(did));
        assert_eq!(result.verification_method(), Some("did:web:issuer.example#key-1"));

        let result = v.verify(&json!({"jwt": token})).await;
        assert!(result.verified(), "{result:?}");
    }

    #[tokio::test]
    async fn body_around_a_token_must_be_signed() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        let v = verifier(fetcher);
        let token = jwt(
            &sk,
            json!({"alg": "EdDSA"}),
            json!({"iss": did, "vc": {"credentialSubject": {"product": "Genuine"}}}),
        );

        let genuine = json!({"issuer": did, "credentialSubject": {"product": "Genuine"}});
        let counterfeit = json!({"issuer": did, "credentialSubject": {"product": "Counterfeit"}});
        let carriers = [
            json!({"jwt": token}),
            json!({"proof": {"type": "EnvelopedProof", "jwt": token}}),
        ];
        for carrier in carriers {
            let mut vc = genuine.clone();
            vc.as_object_mut().unwrap().extend(carrier.as_object().unwrap().clone());
            let result = v.verify(&vc).await;
            assert!(result.verified(), "{result:?}");

            let mut vc = counterfeit.clone();
            vc.as_object_mut().unwrap().extend(carrier.as_object().unwrap().clone());
            let result = v.verify(&vc).await;
            assert!(!result.valid());
            assert_eq!(result.signature_valid(), Some(false));
            assert_eq!(
                result.errors(),
                ["Credential member \"credentialSubject\" is not covered by the signed JWT payload"]
            );
        }

        // A named issuer object is a claim of its own.
        let vc = json!({"issuer": {"id": did, "name": "Evil Corp"}, "jwt": token});
        let result = v.verify(&vc).await;
        assert_eq!(
            result.errors(),
            ["Credential member \"issuer\" is not covered by the signed JWT payload"]
        );
    }

    #[tokio::test]
    async fn credential_issuer_must_match_iss() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        let token = jwt(&sk, json!({"alg": "EdDSA"}), json!({"iss": "did:web:other.example"}));

        let result = verifier(fetcher).verify(&json!({"issuer": did, "jwt": token})).await;
        assert!(!result.valid());
        assert_eq!(result.signature_valid(), Some(false));
        assert_eq!(
            result.errors(),
            ["Credential issuer did:web:issuer.example does not match JWT issuer did:web:other.example"]
        );
    }

    #[test]
    fn envelope_payload_without_vc_claim_is_the_credential() {
        let body = json!({"issuer": "did:web:a.example", "type": ["VerifiableCredential"]});
        let body = body.as_object().unwrap();
        let claims = json!({"issuer": "did:web:a.example", "type": ["VerifiableCredential"]});
        assert_eq!(check_envelope(body, &claims), Ok(()));

        let claims = json!({"issuer": "did:web:a.example"});
        assert_eq!(check_envelope(body, &claims), Err(JwtFailure::UnsignedClaim("type".into())));

        // A bare issuer with no `iss` and no signed `issuer` is not covered.
        let claims = json!({"type": ["VerifiableCredential"]});
        assert_eq!(check_envelope(body, &claims), Err(JwtFailure::UnsignedClaim("issuer".into())));
    }

    #[tokio::test]
    async fn enveloped_jwt_failures() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let other = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let did = "did:web:issuer.example";
        let fetcher = StaticFetcher(HashMap::from([(
            "https://issuer.example/.well-known/did.json".to_string(),
            web_document(did, &sk),
        )]));
        let v = verifier(fetcher);

        let result = v.verify_jwt("not a token").await;
        assert!(result.errors()[0].starts_with("Invalid JWT format"));
        assert_eq!(result.signature_valid(), Some(false));
        assert!(!result.valid());

        let token = jwt(&sk, json!({"alg": "EdDSA"}), json!({"sub": "x"}));
        let result = v.verify_jwt(&token).await;
        assert_eq!(result.errors(), ["Cannot extract issuer DID for JWT verification"]);

        let token = jwt(&sk, json!({"alg": "EdDSA"}), json!({"iss": "did:web:unknown.example"}));
        let result = v.verify_jwt(&token).await;
        assert_eq!(result.errors(), ["Failed to resolve issuer DID: did:web:unknown.example"]);

        let forged = jwt(&other, json!({"alg": "EdDSA"}), json!({"iss": did}));
        let result = v.verify_jwt(&forged).await;
        assert_eq!(result.errors(), ["JWT signature verification failed"]);
        assert_eq!(result.signature_valid(), Some(false));

        let result = v.verify_jwt("").await;
        assert_eq!(result.errors(), ["No JWT token found in credential"]);
    }

    #[test]
    fn did_extraction_from_method_reference() {
        assert_eq!(did_of("did:web:example.com#key-1").unwrap().as_str(), "did:web:example.com");
        assert!(did_of("https://example.com#key-1").is_none());
        assert!(did_of("").is_none());
    }

    #[test]
    fn unverified_issuer_reads_payload() {
        let payload = encode_base64url(br#"{"iss":"did:web:a.example"}"#);
        assert_eq!(
            unverified_issuer(&format!("e30.{payload}.sig")),
            Some("did:web:a.example".to_string())
        );
        assert_eq!(unverified_issuer("e30"), None);
        assert_eq!(unverified_issuer("e30.!!!.sig"), None);
    }
}
