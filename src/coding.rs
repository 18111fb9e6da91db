//! Content-coding normalization.
//!
//! Cached resource variants are distinguished by the content codings a
//! client accepts. The normalizer reduces an `Accept-Encoding` header value
//! to a canonical signature over the configured coding set, so that
//! semantically identical headers map to the same cache key regardless of
//! token order or quality parameters.

use crate::error::{Error, Result};

/// Content codings distinguished by default: brotli and gzip.
pub const DEFAULT_CODINGS: [&str; 2] = ["br", "gzip"];

/// The set of content codings for which resource variants are cached.
///
/// Ordered, immutable after construction except through wholesale
/// replacement, and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCodings {
	codings: Vec<String>,
}

impl ContentCodings {
	/// Creates a coding set from the given tokens.
	///
	/// # Arguments
	///
	/// * `codings` - Lowercase coding tokens, e.g. `["br", "gzip"]`
	///
	/// # Errors
	///
	/// Returns [`Error::EmptyContentCodings`] if the list is empty.
	pub fn new(codings: Vec<String>) -> Result<Self> {
		if codings.is_empty() {
			return Err(Error::EmptyContentCodings);
		}
		Ok(Self { codings })
	}

	/// Replaces the set wholesale.
	///
	/// # Errors
	///
	/// Returns [`Error::EmptyContentCodings`] if the list is empty; the
	/// previous set is left unchanged in that case.
	pub fn replace(&mut self, codings: Vec<String>) -> Result<()> {
		if codings.is_empty() {
			return Err(Error::EmptyContentCodings);
		}
		self.codings = codings;
		Ok(())
	}

	/// Returns a read-only view of the configured tokens.
	pub fn as_slice(&self) -> &[String] {
		&self.codings
	}

	/// Returns true if the token is in the configured set.
	pub fn contains(&self, token: &str) -> bool {
		self.codings.iter().any(|coding| coding == token)
	}
}

impl Default for ContentCodings {
	fn default() -> Self {
		Self {
			codings: DEFAULT_CODINGS.iter().map(|s| s.to_string()).collect(),
		}
	}
}

/// Normalizes an `Accept-Encoding` header value into a canonical signature.
///
/// Tokens are split on commas, stripped of quality parameters, trimmed,
/// ASCII-lowercased, filtered to the configured set, sorted and rejoined
/// with commas. The output is order-independent: any ordering of the same
/// accepted set yields the same signature.
///
/// # Arguments
///
/// * `header` - Raw header value, absent when the request carries none
/// * `codings` - The configured coding set
///
/// # Returns
///
/// The canonical signature, or `None` if the header is absent, blank, or no
/// token matches the configured set.
///
/// # Example
///
/// ```rust
/// use static_resolve_cache::{ContentCodings, content_coding_key};
///
/// let codings = ContentCodings::default();
/// let key = content_coding_key(Some("br;q=0.9, gzip"), &codings);
/// assert_eq!(key.as_deref(), Some("br,gzip"));
/// ```
pub fn content_coding_key(header: Option<&str>, codings: &ContentCodings) -> Option<String> {
	let header = header?;
	if header.trim().is_empty() {
		return None;
	}

	let mut accepted: Vec<String> = header
		.split(',')
		.map(|token| {
			let token = match token.find(';') {
				Some(index) => &token[..index],
				None => token,
			};
			token.trim().to_ascii_lowercase()
		})
		.filter(|token| codings.contains(token))
		.collect();

	if accepted.is_empty() {
		return None;
	}

	accepted.sort();
	Some(accepted.join(","))
}
