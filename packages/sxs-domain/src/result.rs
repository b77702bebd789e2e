use serde::{Deserialize, Serialize};
use url::Url;

pub const SIZE_UNKNOWN: &str = "Size unknown";

/// Running digest fed with the canonical bytes of search results.
pub trait FingerprintSink {
	fn update(&mut self, bytes: &[u8]);
}
impl FingerprintSink for blake3::Hasher {
	fn update(&mut self, bytes: &[u8]) {
		blake3::Hasher::update(self, bytes);
	}
}
impl FingerprintSink for Vec<u8> {
	fn update(&mut self, bytes: &[u8]) {
		self.extend_from_slice(bytes);
	}
}

/// Persists captured result sets. Implemented by the storage layer.
pub trait ResultsStore {
	type Error;

	/// Stores `results` under `fingerprint` and returns an opaque results id.
	fn store(&self, results: &[SearchResult], fingerprint: &str) -> Result<String, Self::Error>;

	fn store_results(&self, results: &[SearchResult]) -> Result<String, Self::Error> {
		self.store(results, &fingerprint(results))
	}
}

/// One backend hit, normalized across backends.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SearchResult {
	url: Url,
	title: String,
	snippet: String,
	size: String,
	crowded: bool,
}
impl SearchResult {
	pub fn new(
		url: Url,
		title: impl Into<String>,
		snippet: impl Into<String>,
		size: impl Into<String>,
		crowded: bool,
	) -> Self {
		Self { url, title: title.into(), snippet: snippet.into(), size: size.into(), crowded }
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn snippet(&self) -> &str {
		&self.snippet
	}

	pub fn size(&self) -> &str {
		&self.size
	}

	/// Whether the backend grouped this hit under a preceding one.
	pub fn crowded(&self) -> bool {
		self.crowded
	}

	pub fn update_fingerprint<S>(&self, sink: &mut S)
	where
		S: FingerprintSink + ?Sized,
	{
		sink.update(self.url.as_str().as_bytes());
		sink.update(self.title.as_bytes());
		sink.update(self.snippet.as_bytes());
		sink.update(self.size.as_bytes());
		sink.update(self.crowded.to_string().as_bytes());
	}
}

/// Hex blake3 digest over `results` in order.
pub fn fingerprint(results: &[SearchResult]) -> String {
	let mut hasher = blake3::Hasher::new();

	for result in results {
		result.update_fingerprint(&mut hasher);
	}

	hasher.finalize().to_hex().to_string()
}
