//! Cache store abstraction and in-memory backend.
//!
//! The caching resolver only needs `get` and `put` over string keys; the
//! eviction policy (LRU, TTL, distributed replication) belongs to whichever
//! backend sits behind [`ResolverCache`]. The bundled
//! [`InMemoryResolverCache`] is a plain replace-on-put map, suitable for
//! process-local deployments and tests.

use crate::resource::{CacheEntry, EntryKind};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Key/value store for resolved resources and resolved URL paths.
///
/// Implementations must honor two contracts:
/// - `get` with a kind that does not match the stored entry behaves as a
///   miss, not an error.
/// - `put` replaces any existing entry under the same key.
#[async_trait]
pub trait ResolverCache: Send + Sync {
	/// Looks up an entry of the expected kind.
	///
	/// # Arguments
	///
	/// * `key` - Cache key
	/// * `kind` - Expected entry kind; a stored entry of another kind is
	///   reported as absent
	///
	/// # Errors
	///
	/// Returns an error if the backend itself fails; a missing or
	/// mismatched entry is `Ok(None)`.
	async fn get(&self, key: &str, kind: EntryKind) -> crate::Result<Option<CacheEntry>>;

	/// Stores an entry, replacing any previous entry under the key.
	///
	/// # Errors
	///
	/// Returns an error if the backend itself fails.
	async fn put(&self, key: &str, entry: CacheEntry) -> crate::Result<()>;
}

/// In-memory cache backend.
///
/// # Example
///
/// ```rust
/// use static_resolve_cache::{CacheEntry, EntryKind, InMemoryResolverCache, ResolverCache};
///
/// # async fn example() {
/// let cache = InMemoryResolverCache::new();
/// cache
///     .put("resolvedUrlPath:/a.js", CacheEntry::UrlPath("/a.js".to_string()))
///     .await
///     .unwrap();
///
/// let entry = cache.get("resolvedUrlPath:/a.js", EntryKind::UrlPath).await.unwrap();
/// assert!(entry.is_some());
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryResolverCache {
	store: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryResolverCache {
	/// Creates a new empty in-memory cache.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Returns the number of stored entries.
	pub async fn len(&self) -> usize {
		self.store.read().await.len()
	}

	/// Returns true if no entries are stored.
	pub async fn is_empty(&self) -> bool {
		self.store.read().await.is_empty()
	}
}

#[async_trait]
impl ResolverCache for InMemoryResolverCache {
	async fn get(&self, key: &str, kind: EntryKind) -> crate::Result<Option<CacheEntry>> {
		let store = self.store.read().await;
		Ok(store
			.get(key)
			.filter(|entry| entry.kind() == kind)
			.cloned())
	}

	async fn put(&self, key: &str, entry: CacheEntry) -> crate::Result<()> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), entry);
		Ok(())
	}
}

/// Named collection of cache stores.
///
/// Stands in for an application-wide cache manager: resolver assembly can
/// refer to a store by name and fail fast when the name is unknown.
#[derive(Clone, Default)]
pub struct CacheRegistry {
	caches: HashMap<String, Arc<dyn ResolverCache>>,
}

impl CacheRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			caches: HashMap::new(),
		}
	}

	/// Registers a store under a name, replacing any previous registration.
	///
	/// # Arguments
	///
	/// * `name` - Cache name used at resolver construction
	/// * `cache` - The store to register
	pub fn register(&mut self, name: impl Into<String>, cache: Arc<dyn ResolverCache>) {
		self.caches.insert(name.into(), cache);
	}

	/// Looks up a store by name.
	pub fn get(&self, name: &str) -> Option<Arc<dyn ResolverCache>> {
		self.caches.get(name).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_put_then_get() {
		let cache = InMemoryResolverCache::new();
		cache
			.put("resolvedUrlPath:/a.js", CacheEntry::UrlPath("/a.js".to_string()))
			.await
			.unwrap();

		let entry = cache
			.get("resolvedUrlPath:/a.js", EntryKind::UrlPath)
			.await
			.unwrap();
		assert_eq!(entry.unwrap().into_url_path().as_deref(), Some("/a.js"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_kind_mismatch_is_miss() {
		let cache = InMemoryResolverCache::new();
		cache
			.put("key", CacheEntry::UrlPath("/a.js".to_string()))
			.await
			.unwrap();

		let entry = cache.get("key", EntryKind::Resource).await.unwrap();
		assert!(entry.is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_put_replaces_existing_entry() {
		let cache = InMemoryResolverCache::new();
		cache
			.put("key", CacheEntry::UrlPath("/old.js".to_string()))
			.await
			.unwrap();
		cache
			.put("key", CacheEntry::UrlPath("/new.js".to_string()))
			.await
			.unwrap();

		let entry = cache.get("key", EntryKind::UrlPath).await.unwrap();
		assert_eq!(entry.unwrap().into_url_path().as_deref(), Some("/new.js"));
		assert_eq!(cache.len().await, 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_registry_lookup() {
		let mut registry = CacheRegistry::new();
		registry.register("static", Arc::new(InMemoryResolverCache::new()));

		assert!(registry.get("static").is_some());
		assert!(registry.get("unknown").is_none());
	}
}
