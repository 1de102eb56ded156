//! # dpp-did — DID Resolution
//!
//! Resolves the decentralized identifiers that issue Digital Product
//! Passport credentials:
//!
//! - **Resolver** (`resolver.rs`): method dispatch, capacity-bounded cache,
//!   and the `None`-on-failure boundary.
//!
//! - **did:web** (`web.rs`): identifier to HTTPS URL mapping. Fetching goes
//!   through the [`DocumentFetcher`] seam (`fetch.rs`), implemented over
//!   `reqwest` by [`HttpsFetcher`].
//!
//! - **did:key** (`key.rs`, `multicodec.rs`): offline document synthesis
//!   from multicodec-prefixed Ed25519, P-256 and P-384 keys.
//!
//! - **Documents** (`document.rs`): [`DidDocument`] and
//!   [`VerificationMethod`], including the derived key type used for
//!   signature dispatch.
//!
//! ## Security Invariant
//!
//! `did:web` documents are only ever fetched over HTTPS, redirects included,
//! and a fetched document whose `id` differs from the requested DID is
//! rejected.

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod key;
pub mod multicodec;
pub mod resolver;
pub mod web;

pub use config::ResolverConfig;
pub use document::{DidDocument, VerificationMethod, DID_V1_CONTEXT};
pub use error::{DocumentError, KeyParseError, ResolutionError};
pub use fetch::{DocumentFetcher, HttpsFetcher, DID_DOCUMENT_ACCEPT};
pub use key::resolve_did_key;
pub use resolver::{DidMethod, DidResolver};
pub use web::did_web_url;
