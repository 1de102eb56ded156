//! # Document Fetching
//!
//! [`DocumentFetcher`] is the network seam of the resolver. The production
//! implementation, [`HttpsFetcher`], performs one GET per call with a
//! bounded timeout and no retries. Tests substitute in-memory fetchers.

use std::future::Future;

use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use serde_json::Value;
use url::Url;

use crate::config::ResolverConfig;
use crate::error::ResolutionError;

/// `Accept` header sent with every document request.
pub const DID_DOCUMENT_ACCEPT: &str = "application/did+json, application/json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Retrieves the JSON body of a DID document URL.
pub trait DocumentFetcher: Send + Sync {
    /// Fetch and decode the JSON document at `url`.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Value, ResolutionError>> + Send;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpsFetcher {
    client: reqwest::Client,
}

impl HttpsFetcher {
    /// Build a fetcher from resolver configuration.
    ///
    /// The client refuses plain-HTTP URLs, including redirect targets, and
    /// follows at most `config.max_redirects` redirects.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .https_only(true)
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ResolutionError::Client)?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured client.
    ///
    /// The caller is responsible for its timeout and redirect policy.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl DocumentFetcher for HttpsFetcher {
    async fn fetch(&self, url: &Url) -> Result<Value, ResolutionError> {
        let endpoint = url.to_string();
        let transport = |e: reqwest::Error, url: String| {
            if e.is_timeout() {
                ResolutionError::Timeout { url }
            } else {
                ResolutionError::Http { url, source: e }
            }
        };

        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, DID_DOCUMENT_ACCEPT)
            .send()
            .await
            .map_err(|e| transport(e, endpoint.clone()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResolutionError::Status {
                url: endpoint,
                status: status.as_u16(),
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ResolutionError::Timeout { url: endpoint }
            } else {
                ResolutionError::InvalidJson {
                    url: endpoint,
                    source: e,
                }
            }
        })
    }
}
