//! `did:key` document synthesis. No network I/O.

use dpp_core::{decode_multibase, Did};
use serde_json::json;

use crate::document::{DidDocument, DID_V1_CONTEXT};
use crate::error::ResolutionError;
use crate::multicodec;

/// Build the self-contained document for a `did:key` DID.
///
/// The document holds exactly one verification method, referenced from
/// both `authentication` and `assertionMethod`.
///
/// # Errors
///
/// Fails if the identifier is not `z`-prefixed base58btc or does not decode
/// to a supported multicodec key.
pub fn resolve_did_key(did: &Did) -> Result<DidDocument, ResolutionError> {
    if did.method() != "key" {
        return Err(ResolutionError::UnsupportedMethod(did.method().to_string()));
    }

    let bytes = decode_multibase(did.method_specific_id())?;
    let vm = multicodec::parse(did, &bytes)?;

    let raw = json!({
        "@context": [DID_V1_CONTEXT],
        "id": did.as_str(),
        "verificationMethod": [&vm],
        "authentication": [vm.id.as_str()],
        "assertionMethod": [vm.id.as_str()],
    });

    Ok(DidDocument {
        id: did.clone(),
        context: vec![DID_V1_CONTEXT.to_string()],
        authentication: vec![vm.id.clone()],
        assertion_method: vec![vm.id.clone()],
        verification_method: vec![vm],
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_core::{DecodeError, KeyAlgorithm};

    const ED25519_DID: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

    #[test]
    fn synthesizes_single_method_document() {
        let did = Did::new(ED25519_DID).unwrap();
        let doc = resolve_did_key(&did).unwrap();

        assert_eq!(doc.id, did);
        assert_eq!(doc.context, vec![DID_V1_CONTEXT]);
        assert_eq!(doc.verification_method.len(), 1);
        let vm = &doc.verification_method[0];
        assert_eq!(doc.authentication, vec![vm.id.clone()]);
        assert_eq!(doc.assertion_method, vec![vm.id.clone()]);
        assert_eq!(vm.key_type(), KeyAlgorithm::Ed25519);
        assert_eq!(doc.assertion_methods(), vec![vm]);
    }

    #[test]
    fn raw_document_reparses_to_the_same_model() {
        let did = Did::new(ED25519_DID).unwrap();
        let doc = resolve_did_key(&did).unwrap();
        let reparsed = DidDocument::from_json(doc.raw.clone()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn non_base58btc_multibase_is_rejected() {
        let did = Did::new("did:key:uAe0B").unwrap();
        assert!(matches!(
            resolve_did_key(&did),
            Err(ResolutionError::Multibase(DecodeError::UnsupportedMultibase(_)))
        ));
    }

    #[test]
    fn malformed_base58_is_rejected() {
        let did = Did::new("did:key:z6Mk0OIl").unwrap();
        assert!(matches!(
            resolve_did_key(&did),
            Err(ResolutionError::Multibase(DecodeError::InvalidCharacter { .. }))
        ));
    }

    #[test]
    fn unsupported_codec_is_rejected() {
        // 0xe701 is secp256k1.
        let did = Did::new(format!(
            "did:key:{}",
            dpp_core::encode_multibase(&[0xe7, 0x01, 0x02, 0x03])
        ))
        .unwrap();
        assert!(matches!(
            resolve_did_key(&did),
            Err(ResolutionError::KeyParse(_))
        ));
    }
}
