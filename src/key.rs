//! Cache key construction.
//!
//! Two disjoint key namespaces keep resolved-resource entries and
//! resolved-URL-path entries apart even when derived from the same request
//! path. Paths are used verbatim; callers pass already-normalized paths and
//! no canonicalization happens here.

/// Prefix for resolved-resource cache keys.
pub const RESOLVED_RESOURCE_KEY_PREFIX: &str = "resolvedResource:";

/// Prefix for resolved-URL-path cache keys.
pub const RESOLVED_URL_PATH_KEY_PREFIX: &str = "resolvedUrlPath:";

/// Builds the cache key for a resource lookup.
///
/// With a coding signature the key carries an `+encoding=` suffix, so
/// encoding-tagged keys never collide with the base key for the same path.
///
/// # Arguments
///
/// * `request_path` - The request path, used verbatim
/// * `coding_key` - Canonical coding signature, if any
pub fn resource_key(request_path: &str, coding_key: Option<&str>) -> String {
	match coding_key {
		Some(coding_key) => format!(
			"{}{}+encoding={}",
			RESOLVED_RESOURCE_KEY_PREFIX, request_path, coding_key
		),
		None => format!("{}{}", RESOLVED_RESOURCE_KEY_PREFIX, request_path),
	}
}

/// Builds the cache key for a URL path lookup.
///
/// Path keys carry no coding dependency.
pub fn url_path_key(resource_url_path: &str) -> String {
	format!("{}{}", RESOLVED_URL_PATH_KEY_PREFIX, resource_url_path)
}
