//! Error types for the resolve cache.
//!
//! Configuration problems are reported eagerly, before any resolution
//! traffic is handled. Failures raised by a cache backend or by the rest of
//! the resolver chain pass through unchanged.

use thiserror::Error;

/// Errors that can occur while configuring or running the caching resolver.
#[derive(Debug, Error)]
pub enum Error {
	/// No cache with the given name is registered.
	#[error("Cache '{name}' not found")]
	CacheNotFound {
		/// Name that failed to resolve against the registry.
		name: String,
	},

	/// An empty content-coding list was supplied.
	#[error("At least one content coding expected")]
	EmptyContentCodings,

	/// I/O failure while reading resource metadata.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Failure raised by a cache backend or a downstream resolver stage.
	#[error("Upstream error: {0}")]
	Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
	/// Wraps an arbitrary backend or chain-stage failure.
	///
	/// The caching layer never translates these further; they surface to the
	/// caller exactly as a chain without caching would surface them.
	pub fn upstream<E>(err: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::Upstream(Box::new(err))
	}
}

/// Result type alias for resolve-cache operations.
pub type Result<T> = std::result::Result<T, Error>;
