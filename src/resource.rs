//! Resource handles and cache entry variants.
//!
//! A [`Resource`] is an immutable handle to a resolved static asset. The
//! cache stores two distinct kinds of values, resolved resources and
//! resolved URL paths, modeled as a tagged [`CacheEntry`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Metadata handle for a resolved static asset.
///
/// Immutable once resolved. The caching layer only stores and retrieves
/// shared references to resources; it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
	/// Absolute path to the underlying file
	pub path: PathBuf,

	/// Content length in bytes
	pub size: u64,

	/// Last modification time
	pub modified: SystemTime,

	/// MIME type guessed from the file extension
	pub mime_type: String,
}

impl Resource {
	/// Creates a resource handle from a file path.
	///
	/// # Arguments
	///
	/// * `path` - Path to the file
	///
	/// # Errors
	///
	/// Returns error if file metadata cannot be read
	///
	/// # Example
	///
	/// ```rust,ignore
	/// use static_resolve_cache::Resource;
	/// use std::path::Path;
	///
	/// let resource = Resource::from_path(Path::new("static/app.js"))?;
	/// ```
	pub fn from_path(path: &Path) -> crate::Result<Self> {
		let metadata = fs::metadata(path)?;

		let size = metadata.len();
		let modified = metadata.modified()?;
		let mime_type = mime_guess::from_path(path)
			.first_or_octet_stream()
			.to_string();

		Ok(Self {
			path: path.to_path_buf(),
			size,
			modified,
			mime_type,
		})
	}
}

/// Kind tag for type-aware cache retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
	/// A resolved [`Resource`]
	Resource,

	/// A resolved public URL path
	UrlPath,
}

/// A value stored in the resolver cache.
///
/// The value space is closed: either a resolved resource or a resolved URL
/// path. Retrieval is type-aware; asking for one kind and finding the other
/// behaves as a miss rather than an error.
#[derive(Debug, Clone)]
pub enum CacheEntry {
	/// Resolved resource entry
	Resource(Arc<Resource>),

	/// Resolved URL path entry
	UrlPath(String),
}

impl CacheEntry {
	/// Returns the kind tag of this entry.
	pub fn kind(&self) -> EntryKind {
		match self {
			Self::Resource(_) => EntryKind::Resource,
			Self::UrlPath(_) => EntryKind::UrlPath,
		}
	}

	/// Extracts the resource, or `None` if this entry holds a URL path.
	pub fn into_resource(self) -> Option<Arc<Resource>> {
		match self {
			Self::Resource(resource) => Some(resource),
			Self::UrlPath(_) => None,
		}
	}

	/// Extracts the URL path, or `None` if this entry holds a resource.
	pub fn into_url_path(self) -> Option<String> {
		match self {
			Self::Resource(_) => None,
			Self::UrlPath(path) => Some(path),
		}
	}
}
