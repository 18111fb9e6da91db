//! Resolver chain traits and the caching resolver.
//!
//! Resolution is organized as a chain of responsibility: each
//! [`ResourceResolver`] either produces a result or delegates to the rest of
//! the chain through an explicit [`ResolverChain`] handle. The
//! [`CachingResolver`] is one such link: it answers from its cache store on
//! a hit and otherwise delegates, storing successful results on the way
//! back.

use crate::coding::{ContentCodings, content_coding_key};
use crate::error::{Error, Result};
use crate::key::{resource_key, url_path_key};
use crate::resource::{CacheEntry, EntryKind, Resource};
use crate::store::{CacheRegistry, ResolverCache};
use async_trait::async_trait;
use hyper::HeaderMap;
use hyper::header::{ACCEPT_ENCODING, HeaderName, HeaderValue};
use std::path::PathBuf;
use std::sync::Arc;

/// Request metadata visible to resolver stages.
///
/// Carries the request headers; resolution triggered outside an HTTP
/// request (template rendering, link generation) passes no context at all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
	headers: HeaderMap,
}

impl RequestContext {
	/// Creates an empty request context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a context from existing request headers.
	pub fn from_headers(headers: HeaderMap) -> Self {
		Self { headers }
	}

	/// Adds a header using builder pattern.
	///
	/// # Example
	///
	/// ```rust
	/// use static_resolve_cache::RequestContext;
	/// use hyper::header::ACCEPT_ENCODING;
	///
	/// let request = RequestContext::new()
	///     .with_header(ACCEPT_ENCODING, "gzip, br".parse().unwrap());
	/// assert_eq!(request.header("accept-encoding"), Some("gzip, br"));
	/// ```
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Returns a header value as a string, if present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}
}

/// Handle to the remainder of a resolver chain.
///
/// A resolver stage delegates by invoking the chain it was handed; the
/// terminal chain resolves everything to absent.
#[async_trait]
pub trait ResolverChain: Send + Sync {
	/// Resolves a request path to a resource via the remaining stages.
	///
	/// # Errors
	///
	/// Returns an error if any remaining stage fails.
	async fn resolve_resource(
		&self,
		request: Option<&RequestContext>,
		request_path: &str,
		locations: &[PathBuf],
	) -> Result<Option<Arc<Resource>>>;

	/// Resolves an internal resource path to its public URL path via the
	/// remaining stages.
	///
	/// # Errors
	///
	/// Returns an error if any remaining stage fails.
	async fn resolve_url_path(
		&self,
		resource_url_path: &str,
		locations: &[PathBuf],
	) -> Result<Option<String>>;
}

/// One stage in a resolver chain.
///
/// A stage receives the rest of the chain explicitly and decides whether to
/// short-circuit with its own answer or delegate, mirroring how middleware
/// receives a `next` handler.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
	/// Resolves a request path to a resource.
	///
	/// # Arguments
	///
	/// * `request` - Request metadata, absent for non-HTTP-driven resolution
	/// * `request_path` - Already-normalized request path
	/// * `locations` - Candidate root locations to search
	/// * `chain` - The remaining resolver stages
	///
	/// # Errors
	///
	/// Returns an error if this stage or a delegated stage fails.
	async fn resolve_resource(
		&self,
		request: Option<&RequestContext>,
		request_path: &str,
		locations: &[PathBuf],
		chain: &dyn ResolverChain,
	) -> Result<Option<Arc<Resource>>>;

	/// Resolves an internal resource path to its public URL path.
	///
	/// # Errors
	///
	/// Returns an error if this stage or a delegated stage fails.
	async fn resolve_url_path(
		&self,
		resource_url_path: &str,
		locations: &[PathBuf],
		chain: &dyn ResolverChain,
	) -> Result<Option<String>>;
}

/// Default chain over an ordered list of resolver stages.
///
/// Built back to front so each stage sees the stages after it as its tail;
/// the terminal link resolves everything to absent.
pub struct DefaultResolverChain {
	head: Option<(Arc<dyn ResourceResolver>, Arc<DefaultResolverChain>)>,
}

impl DefaultResolverChain {
	/// Composes a chain from resolver stages in invocation order.
	///
	/// # Example
	///
	/// ```rust,ignore
	/// use static_resolve_cache::{CachingResolver, DefaultResolverChain, InMemoryResolverCache};
	/// use std::sync::Arc;
	///
	/// let caching = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
	/// let chain = DefaultResolverChain::new(vec![Arc::new(caching), path_resolver]);
	/// ```
	pub fn new(resolvers: Vec<Arc<dyn ResourceResolver>>) -> Self {
		let mut chain = Self { head: None };
		for resolver in resolvers.into_iter().rev() {
			chain = Self {
				head: Some((resolver, Arc::new(chain))),
			};
		}
		chain
	}
}

#[async_trait]
impl ResolverChain for DefaultResolverChain {
	async fn resolve_resource(
		&self,
		request: Option<&RequestContext>,
		request_path: &str,
		locations: &[PathBuf],
	) -> Result<Option<Arc<Resource>>> {
		match &self.head {
			Some((resolver, next)) => {
				resolver
					.resolve_resource(request, request_path, locations, next.as_ref())
					.await
			}
			None => Ok(None),
		}
	}

	async fn resolve_url_path(
		&self,
		resource_url_path: &str,
		locations: &[PathBuf],
	) -> Result<Option<String>> {
		match &self.head {
			Some((resolver, next)) => {
				resolver
					.resolve_url_path(resource_url_path, locations, next.as_ref())
					.await
			}
			None => Ok(None),
		}
	}
}

/// Cache-aside resolver stage.
///
/// Checks the cache store before delegating to the rest of the chain and
/// stores successful results. Absent results are never cached, so not-found
/// paths are re-resolved on every request. Errors from the store or the
/// chain propagate unchanged; on failure the stage behaves exactly like a
/// chain without caching.
///
/// Two concurrent misses for the same key may both delegate and both write;
/// the store's replace-on-put semantics make that benign (last write wins).
pub struct CachingResolver {
	cache: Arc<dyn ResolverCache>,
	content_codings: ContentCodings,
}

impl CachingResolver {
	/// Creates a caching resolver over the given store.
	pub fn new(cache: Arc<dyn ResolverCache>) -> Self {
		Self {
			cache,
			content_codings: ContentCodings::default(),
		}
	}

	/// Creates a caching resolver from a named store in a registry.
	///
	/// # Errors
	///
	/// Returns [`Error::CacheNotFound`] if no store is registered under the
	/// name.
	pub fn from_registry(registry: &CacheRegistry, name: &str) -> Result<Self> {
		let cache = registry.get(name).ok_or_else(|| Error::CacheNotFound {
			name: name.to_string(),
		})?;
		Ok(Self::new(cache))
	}

	/// Returns the configured cache store.
	pub fn cache(&self) -> &Arc<dyn ResolverCache> {
		&self.cache
	}

	/// Replaces the supported content codings wholesale.
	///
	/// The codings configured here are expected to match those of the stage
	/// that serves encoded variants. Configure before the resolver is shared
	/// across in-flight requests; once it is behind an `Arc` the set is
	/// frozen.
	///
	/// # Errors
	///
	/// Returns [`Error::EmptyContentCodings`] for an empty list; the
	/// previous set is left unchanged.
	pub fn set_content_codings(&mut self, codings: Vec<String>) -> Result<()> {
		self.content_codings.replace(codings)
	}

	/// Returns a read-only view of the supported content codings.
	pub fn content_codings(&self) -> &[String] {
		self.content_codings.as_slice()
	}

	/// Computes the resource cache key for a request.
	///
	/// The key is a pure function of the request path and the normalized
	/// coding signature; without request metadata the signature is empty.
	pub fn compute_key(&self, request: Option<&RequestContext>, request_path: &str) -> String {
		let coding_key = request.and_then(|request| {
			content_coding_key(request.header(ACCEPT_ENCODING.as_str()), &self.content_codings)
		});
		resource_key(request_path, coding_key.as_deref())
	}
}

#[async_trait]
impl ResourceResolver for CachingResolver {
	async fn resolve_resource(
		&self,
		request: Option<&RequestContext>,
		request_path: &str,
		locations: &[PathBuf],
		chain: &dyn ResolverChain,
	) -> Result<Option<Arc<Resource>>> {
		let key = self.compute_key(request, request_path);

		if let Some(entry) = self.cache.get(&key, EntryKind::Resource).await?
			&& let Some(resource) = entry.into_resource()
		{
			log::trace!("Resource resolved from cache");
			return Ok(Some(resource));
		}

		let resource = chain.resolve_resource(request, request_path, locations).await?;
		if let Some(resource) = &resource {
			self.cache
				.put(&key, CacheEntry::Resource(resource.clone()))
				.await?;
		}

		Ok(resource)
	}

	async fn resolve_url_path(
		&self,
		resource_url_path: &str,
		locations: &[PathBuf],
		chain: &dyn ResolverChain,
	) -> Result<Option<String>> {
		let key = url_path_key(resource_url_path);

		if let Some(entry) = self.cache.get(&key, EntryKind::UrlPath).await?
			&& let Some(resolved) = entry.into_url_path()
		{
			log::trace!("Path resolved from cache");
			return Ok(Some(resolved));
		}

		let resolved = chain.resolve_url_path(resource_url_path, locations).await?;
		if let Some(resolved) = &resolved {
			self.cache
				.put(&key, CacheEntry::UrlPath(resolved.clone()))
				.await?;
		}

		Ok(resolved)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::InMemoryResolverCache;
	use rstest::rstest;

	#[rstest]
	fn test_from_registry_unknown_name_fails() {
		let registry = CacheRegistry::new();
		let result = CachingResolver::from_registry(&registry, "static");
		assert!(matches!(
			result,
			Err(Error::CacheNotFound { name }) if name == "static"
		));
	}

	#[rstest]
	fn test_from_registry_known_name() {
		let mut registry = CacheRegistry::new();
		registry.register("static", Arc::new(InMemoryResolverCache::new()));
		assert!(CachingResolver::from_registry(&registry, "static").is_ok());
	}

	#[rstest]
	fn test_set_content_codings_rejects_empty() {
		let mut resolver = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
		let result = resolver.set_content_codings(vec![]);
		assert!(matches!(result, Err(Error::EmptyContentCodings)));
		assert_eq!(resolver.content_codings(), &["br".to_string(), "gzip".to_string()]);
	}

	#[rstest]
	fn test_compute_key_without_request() {
		let resolver = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
		assert_eq!(resolver.compute_key(None, "/app.js"), "resolvedResource:/app.js");
	}

	#[rstest]
	fn test_compute_key_with_accept_encoding() {
		let resolver = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
		let request = RequestContext::new()
			.with_header(ACCEPT_ENCODING, "gzip".parse().unwrap());
		assert_eq!(
			resolver.compute_key(Some(&request), "/app.js"),
			"resolvedResource:/app.js+encoding=gzip"
		);
	}

	#[rstest]
	fn test_compute_key_ignores_unsupported_codings() {
		let resolver = CachingResolver::new(Arc::new(InMemoryResolverCache::new()));
		let request = RequestContext::new()
			.with_header(ACCEPT_ENCODING, "deflate".parse().unwrap());
		assert_eq!(
			resolver.compute_key(Some(&request), "/app.js"),
			"resolvedResource:/app.js"
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_terminal_chain_resolves_to_absent() {
		let chain = DefaultResolverChain::new(vec![]);
		let resource = chain.resolve_resource(None, "/app.js", &[]).await.unwrap();
		assert!(resource.is_none());

		let path = chain.resolve_url_path("/app.js", &[]).await.unwrap();
		assert!(path.is_none());
	}
}
