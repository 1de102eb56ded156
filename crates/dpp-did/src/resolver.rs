//! # DID Resolver
//!
//! Resolves `did:web` and `did:key` identifiers to [`DidDocument`]s and
//! caches the results.
//!
//! ## Failure model
//!
//! [`DidResolver::resolve`] never returns an error and never panics: an
//! unresolvable DID is `None`, with the cause logged at `warn`. Resolution
//! failure is an expected outcome when verifying third-party credentials.
//! [`DidResolver::try_resolve`] exposes the cause for callers that need it.
//!
//! ## Cache
//!
//! A capacity-bounded map from DID to document with no TTL and no eviction:
//! once `cache_size` entries are held, further results are returned but not
//! cached. The lock is taken for a single lookup or insert and is never held
//! across network I/O, so concurrent misses for one DID may both fetch.

use std::collections::HashMap;
use std::sync::Arc;

use dpp_core::Did;
use parking_lot::Mutex;

use crate::config::ResolverConfig;
use crate::document::DidDocument;
use crate::error::ResolutionError;
use crate::fetch::{DocumentFetcher, HttpsFetcher};
use crate::key::resolve_did_key;
use crate::web::did_web_url;

/// The DID methods this resolver recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DidMethod {
    /// `did:web`, fetched over HTTPS.
    Web,
    /// `did:key`, synthesized locally.
    Key,
    /// Anything else.
    Unsupported(String),
}

impl DidMethod {
    /// Classify a DID by its method segment.
    pub fn of(did: &Did) -> Self {
        match did.method() {
            "web" => Self::Web,
            "key" => Self::Key,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// Resolves DIDs to documents through a [`DocumentFetcher`], with caching.
#[derive(Debug)]
pub struct DidResolver<F = HttpsFetcher> {
    fetcher: F,
    cache: Mutex<HashMap<Did, Arc<DidDocument>>>,
    cache_size: usize,
}

impl DidResolver<HttpsFetcher> {
    /// Create a resolver with an HTTPS fetcher built from `config`.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        Ok(Self::with_fetcher(HttpsFetcher::new(config)?, config))
    }
}

impl<F: DocumentFetcher> DidResolver<F> {
    /// Create a resolver using a custom fetcher.
    pub fn with_fetcher(fetcher: F, config: &ResolverConfig) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(HashMap::new()),
            cache_size: config.cache_size,
        }
    }

    /// Resolve a DID to its document.
    ///
    /// Returns `None` for malformed DIDs, unsupported methods, network or
    /// parse failures, and documents that describe a different DID.
    pub async fn resolve(&self, did: &str) -> Option<Arc<DidDocument>> {
        let did = match Did::new(did) {
            Ok(did) => did,
            Err(e) => {
                tracing::warn!(did, error = %e, "cannot resolve malformed DID");
                return None;
            }
        };

        let cached = self.cache.lock().get(&did).cloned();
        if let Some(doc) = cached {
            tracing::debug!(did = %did, "DID cache hit");
            return Some(doc);
        }
        tracing::debug!(did = %did, "DID cache miss");

        let doc = match self.try_resolve(&did).await {
            Ok(doc) => Arc::new(doc),
            Err(e) => {
                tracing::warn!(did = %did, error = %e, "DID resolution failed");
                return None;
            }
        };

        {
            let mut cache = self.cache.lock();
            if cache.len() < self.cache_size {
                cache.insert(did, Arc::clone(&doc));
            }
        }
        Some(doc)
    }

    /// Resolve without consulting or populating the cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ResolutionError`] that [`resolve`](Self::resolve) would
    /// log.
    pub async fn try_resolve(&self, did: &Did) -> Result<DidDocument, ResolutionError> {
        match DidMethod::of(did) {
            DidMethod::Key => resolve_did_key(did),
            DidMethod::Web => self.resolve_web(did).await,
            DidMethod::Unsupported(method) => Err(ResolutionError::UnsupportedMethod(method)),
        }
    }

    async fn resolve_web(&self, did: &Did) -> Result<DidDocument, ResolutionError> {
        let url = did_web_url(did)?;
        let raw = self.fetcher.fetch(&url).await?;
        let doc = DidDocument::from_json(raw)?;
        if doc.id != *did {
            return Err(ResolutionError::IdMismatch {
                requested: did.to_string(),
                found: doc.id.to_string(),
            });
        }
        Ok(doc)
    }

    /// Drop every cached document.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        let cleared = cache.len();
        cache.clear();
        tracing::info!(cleared, "DID cache cleared");
    }

    /// Number of cached documents.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Configured cache capacity.
    pub fn cache_size(&self) -> usize {
        self.cache_size
    }
}
