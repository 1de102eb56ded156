//! Resolver configuration.
//!
//! Every setting has a default, so a missing or unparsable environment
//! variable never prevents a resolver from being built.

use std::time::Duration;

/// Default number of resolved documents kept in the cache.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// Default per-request timeout for `did:web` fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of HTTP redirects followed for `did:web` fetches.
pub const DEFAULT_MAX_REDIRECTS: usize = 3;

/// Tunables for [`DidResolver`](crate::DidResolver) and
/// [`HttpsFetcher`](crate::HttpsFetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of cached documents. Once full, new results are not
    /// cached.
    pub cache_size: usize,
    /// Per-request timeout for `did:web` fetches.
    pub timeout: Duration,
    /// Maximum number of redirects followed. Redirects stay HTTPS-only.
    pub max_redirects: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    ///
    /// - `DPP_DID_CACHE_SIZE` (default 100)
    /// - `DPP_DID_TIMEOUT_SECS` (default 10)
    /// - `DPP_DID_MAX_REDIRECTS` (default 3)
    ///
    /// Unset or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let defaults = Self::default();

        Self {
            cache_size: parsed("DPP_DID_CACHE_SIZE")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.cache_size),
            timeout: parsed("DPP_DID_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_redirects: parsed("DPP_DID_MAX_REDIRECTS")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.max_redirects),
        }
    }

    /// Set the cache capacity.
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect limit.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}
