//! `did:web` identifier to document URL mapping.
//!
//! ```text
//! did:web:example.com              -> https://example.com/.well-known/did.json
//! did:web:example.com:a:b          -> https://example.com/a/b/did.json
//! did:web:localhost%3A8443         -> https://localhost:8443/.well-known/did.json
//! ```
//!
//! The scheme is always `https`. The domain is restricted to hostname
//! characters and an optional numeric port so that a crafted identifier
//! cannot smuggle userinfo, a query, or a different host into the URL.

use dpp_core::Did;
use url::Url;

use crate::error::ResolutionError;

/// Compute the HTTPS URL of the document for a `did:web` DID.
///
/// # Errors
///
/// Returns [`ResolutionError::UnsupportedMethod`] for non-`web` DIDs and
/// [`ResolutionError::InvalidDidWeb`] for identifiers that do not map to a
/// well-formed URL.
pub fn did_web_url(did: &Did) -> Result<Url, ResolutionError> {
    if did.method() != "web" {
        return Err(ResolutionError::UnsupportedMethod(did.method().to_string()));
    }
    let invalid = |reason: &str| ResolutionError::InvalidDidWeb {
        did: did.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = did.method_specific_id().split(':');
    let domain = segments
        .next()
        .map(|d| d.replace("%3A", ":").replace("%3a", ":"))
        .unwrap_or_default();
    check_domain(&domain).map_err(invalid)?;

    let path: Vec<&str> = segments.collect();
    if path.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return Err(invalid("empty or relative path segment"));
    }
    if path.iter().any(|s| s.contains(['/', '?', '#', '\\'])) {
        return Err(invalid("path segment contains a reserved character"));
    }

    let url = if path.is_empty() {
        format!("https://{domain}/.well-known/did.json")
    } else {
        format!("https://{domain}/{}/did.json", path.join("/"))
    };
    Url::parse(&url).map_err(|e| invalid(&e.to_string()))
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    let (host, port) = match domain.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (domain, None),
    };
    if host.is_empty() {
        return Err("empty domain");
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err("domain contains characters outside a hostname");
    }
    if let Some(port) = port {
        if port.is_empty()
            || !port.chars().all(|c| c.is_ascii_digit())
            || port.parse::<u16>().is_err()
        {
            return Err("invalid port");
        }
    }
    Ok(())
}
