//! # Static Resolve Cache
//!
//! Cache-aside resolution layer for static resource resolver chains.
//!
//! Static assets are resolved by a chain of stages (path mapping, encoded
//! variants, fingerprint rewriting). This crate provides the caching link of
//! such a chain:
//!
//! - Resolution results are cached under keys derived from the request path
//!   and the normalized `Accept-Encoding` value, so compressed variants of
//!   the same path are cached independently
//! - On a hit the rest of the chain is never invoked
//! - Absent results are never cached; not-found paths are re-resolved
//! - Store and chain failures propagate unchanged
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use static_resolve_cache::{
//!     CachingResolver, DefaultResolverChain, InMemoryResolverCache, RequestContext,
//! };
//! use hyper::header::ACCEPT_ENCODING;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let caching = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
//!
//!     // The caching link goes first; the rest of the chain does the work.
//!     let chain = DefaultResolverChain::new(vec![Arc::new(caching), path_resolver()]);
//!
//!     let request = RequestContext::new()
//!         .with_header(ACCEPT_ENCODING, "gzip, br".parse()?);
//!     let resource = chain
//!         .resolve_resource(Some(&request), "/app.js", &locations())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`resolver`] - Chain traits and the caching resolver
//! - [`store`] - Cache store abstraction, in-memory backend, named registry
//! - [`coding`] - Content-coding normalization
//! - [`key`] - Cache key namespaces and builders
//! - [`resource`] - Resource handles and cache entry variants
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod coding;
pub mod error;
pub mod key;
pub mod resolver;
pub mod resource;
pub mod store;

// Re-export main types
pub use coding::{ContentCodings, DEFAULT_CODINGS, content_coding_key};
pub use error::{Error, Result};
pub use key::{
	RESOLVED_RESOURCE_KEY_PREFIX, RESOLVED_URL_PATH_KEY_PREFIX, resource_key, url_path_key,
};
pub use resolver::{
	CachingResolver, DefaultResolverChain, RequestContext, ResolverChain, ResourceResolver,
};
pub use resource::{CacheEntry, EntryKind, Resource};
pub use store::{CacheRegistry, InMemoryResolverCache, ResolverCache};
