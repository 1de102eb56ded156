//! Shared fixtures: issuer keys, credential signing, and a did:web fetcher
//! that serves documents from a local mock server.

#![allow(dead_code)]

use std::sync::Arc;

use dpp_core::{encode_base64url, encode_multibase, Jwk, VerifyData};
use dpp_did::{DidResolver, DocumentFetcher, HttpsFetcher, ResolutionError, ResolverConfig};
use dpp_vc::CredentialVerifier;
use rand_core::OsRng;
use serde_json::{json, Value};
use url::Url;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Route `tracing` output to the test harness. Controlled by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Issuer keys
// ---------------------------------------------------------------------------

/// A signing key of one of the supported algorithms.
pub enum IssuerKey {
    Ed25519(ed25519_dalek::SigningKey),
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
}

impl IssuerKey {
    pub fn ed25519() -> Self {
        Self::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    pub fn p256() -> Self {
        Self::P256(p256::ecdsa::SigningKey::random(&mut OsRng))
    }

    pub fn p384() -> Self {
        Self::P384(p384::ecdsa::SigningKey::random(&mut OsRng))
    }

    /// Public key as a JWK.
    pub fn jwk(&self) -> Jwk {
        match self {
            Self::Ed25519(sk) => Jwk::ed25519(encode_base64url(sk.verifying_key().as_bytes())),
            Self::P256(sk) => {
                let point = sk.verifying_key().to_encoded_point(false);
                Jwk::ec(
                    "P-256",
                    encode_base64url(point.x().unwrap()),
                    encode_base64url(point.y().unwrap()),
                )
            }
            Self::P384(sk) => {
                let point = sk.verifying_key().to_encoded_point(false);
                Jwk::ec(
                    "P-384",
                    encode_base64url(point.x().unwrap()),
                    encode_base64url(point.y().unwrap()),
                )
            }
        }
    }

    /// JOSE `alg` for this key.
    pub fn jose_alg(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "EdDSA",
            Self::P256(_) => "ES256",
            Self::P384(_) => "ES384",
        }
    }

    /// Fixed-width signature (64 bytes for Ed25519 and P-256, 96 for P-384).
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Ed25519(sk) => {
                use ed25519_dalek::Signer;
                sk.sign(message).to_bytes().to_vec()
            }
            Self::P256(sk) => {
                use p256::ecdsa::signature::Signer;
                let sig: p256::ecdsa::Signature = sk.sign(message);
                sig.to_bytes().to_vec()
            }
            Self::P384(sk) => {
                use p384::ecdsa::signature::Signer;
                let sig: p384::ecdsa::Signature = sk.sign(message);
                sig.to_bytes().to_vec()
            }
        }
    }

    /// ASN.1 DER signature. Only meaningful for the ECDSA keys.
    pub fn sign_der(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Ed25519(_) => self.sign(message),
            Self::P256(sk) => {
                use p256::ecdsa::signature::Signer;
                let sig: p256::ecdsa::Signature = sk.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
            Self::P384(sk) => {
                use p384::ecdsa::signature::Signer;
                let sig: p384::ecdsa::Signature = sk.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
        }
    }

    /// The `did:key` for this key. EC keys use the compressed point.
    pub fn did_key(&self) -> String {
        let mut bytes = Vec::new();
        match self {
            Self::Ed25519(sk) => {
                bytes.extend_from_slice(&[0xed, 0x01]);
                bytes.extend_from_slice(sk.verifying_key().as_bytes());
            }
            Self::P256(sk) => {
                bytes.extend_from_slice(&[0x80, 0x24]);
                bytes.extend_from_slice(sk.verifying_key().to_encoded_point(true).as_bytes());
            }
            Self::P384(sk) => {
                bytes.extend_from_slice(&[0x81, 0x24]);
                bytes.extend_from_slice(sk.verifying_key().to_encoded_point(true).as_bytes());
            }
        }
        format!("did:key:{}", encode_multibase(&bytes))
    }

    /// The verification method id of this key's `did:key` document.
    pub fn did_key_method(&self) -> String {
        let did = self.did_key();
        let suffix = did.trim_start_matches("did:key:").to_string();
        format!("{did}#{suffix}")
    }

    /// A compact JWS over `header` and `payload`.
    pub fn jws(&self, header: &Value, payload: &Value) -> String {
        let input = format!(
            "{}.{}",
            encode_base64url(header.to_string().as_bytes()),
            encode_base64url(payload.to_string().as_bytes())
        );
        let sig = self.sign(input.as_bytes());
        format!("{input}.{}", encode_base64url(&sig))
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An unsigned product passport credential issued by `issuer`.
pub fn passport(issuer: &str) -> Value {
    json!({
        "@context": [
            "https://www.w3.org/ns/credentials/v2",
            "https://test.uncefact.org/vocabulary/untp/dpp/0.5.0/"
        ],
        "id": "https://example.com/credentials/2a423366-a0d6-4855-ba65-2e0c926d09b0",
        "type": ["VerifiableCredential", "DigitalProductPassport"],
        "issuer": {"id": issuer, "name": "Acme Textiles Ltd"},
        "validFrom": "2026-01-01T00:00:00Z",
        "credentialSubject": {
            "type": ["ProductPassport"],
            "product": {
                "id": "https://id.gs1.org/01/09520123456788",
                "name": "Organic cotton T-shirt",
                "countryOfProduction": "PT",
                "materials": [{"name": "Cotton", "massFraction": 0.95}, {"name": "Elastane", "massFraction": 0.05}]
            }
        }
    })
}

/// Proof options (everything but `proofValue`) for a Data Integrity proof.
pub fn proof_options(proof_type: &str, verification_method: &str) -> Value {
    json!({
        "type": proof_type,
        "created": "2026-01-01T00:00:00Z",
        "verificationMethod": verification_method,
        "proofPurpose": "assertionMethod"
    })
}

/// Sign `credential` and return the proof, with a multibase `proofValue`.
pub fn data_integrity_proof(
    credential: &Value,
    key: &IssuerKey,
    proof_type: &str,
    verification_method: &str,
) -> Value {
    let mut proof = proof_options(proof_type, verification_method);
    let data = VerifyData::new(credential, &proof).unwrap();
    proof["proofValue"] = json!(encode_multibase(&key.sign(data.as_bytes())));
    proof
}

/// `credential` with an Ed25519 did:key proof attached.
pub fn signed_with_did_key(credential: &Value, key: &IssuerKey) -> Value {
    let mut signed = credential.clone();
    signed["proof"] =
        data_integrity_proof(credential, key, "Ed25519Signature2020", &key.did_key_method());
    signed
}

// ---------------------------------------------------------------------------
// did:web documents
// ---------------------------------------------------------------------------

/// A DID document publishing `keys` as `#key-1`, `#key-2`, ...
pub fn did_document(did: &str, keys: &[&IssuerKey]) -> Value {
    let methods: Vec<Value> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            json!({
                "id": format!("{did}#key-{}", i + 1),
                "type": "JsonWebKey2020",
                "controller": did,
                "publicKeyJwk": key.jwk()
            })
        })
        .collect();
    let ids: Vec<Value> = methods.iter().map(|m| m["id"].clone()).collect();
    json!({
        "@context": ["https://www.w3.org/ns/did/v1", "https://w3id.org/security/suites/jws-2020/v1"],
        "id": did,
        "verificationMethod": methods,
        "authentication": ids,
        "assertionMethod": ids
    })
}

/// Fetches did:web documents from a local mock server, keeping the path of
/// the production HTTPS URL.
pub struct MockServerFetcher {
    inner: HttpsFetcher,
    base: Url,
}

impl MockServerFetcher {
    pub fn new(server_uri: &str) -> Self {
        Self {
            inner: HttpsFetcher::from_client(reqwest::Client::new()),
            base: Url::parse(server_uri).unwrap(),
        }
    }
}

impl DocumentFetcher for MockServerFetcher {
    async fn fetch(&self, url: &Url) -> Result<Value, ResolutionError> {
        let mut local = self.base.clone();
        local.set_path(url.path());
        self.inner.fetch(&local).await
    }
}

/// A verifier whose did:web lookups go to the mock server at `server_uri`.
pub fn mock_verifier(server_uri: &str) -> CredentialVerifier<MockServerFetcher> {
    let resolver = DidResolver::with_fetcher(
        MockServerFetcher::new(server_uri),
        &ResolverConfig::default(),
    );
    CredentialVerifier::with_resolver(Arc::new(resolver))
}
