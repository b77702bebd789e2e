mod error;

pub use error::{Error, Result};

// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;

// self
use sxs_domain::{QueryFormatter, QueryOptions, SearchResult, gsa};

/// Builds the client used for result fetches. Timeouts live here, not in the formatters.
pub fn http_client(cfg: &sxs_config::Http) -> Result<Client> {
	let mut builder = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms));

	if let Some(agent) = cfg.user_agent.as_deref() {
		builder = builder.user_agent(agent);
	}

	Ok(builder.build()?)
}

/// Fetches and parses the result list for `options`.
///
/// Returns `Ok(None)` when the formatter has no structured result source. Transport failures,
/// non-success statuses, and malformed documents fail the whole fetch; nothing is retried.
/// Relative result URLs resolve against the request URL.
pub async fn search_results(
	client: &Client,
	formatter: &QueryFormatter,
	options: &QueryOptions,
) -> Result<Option<Vec<SearchResult>>> {
	let Some(url) = formatter.results_uri(options) else {
		tracing::debug!(kind = formatter.kind().as_str(), "Formatter has no result source.");

		return Ok(None);
	};

	tracing::debug!(url = %url, "Fetching search results.");

	let res = client.get(url.clone()).send().await?;
	let status = res.status();

	if !status.is_success() {
		tracing::warn!(url = %url, status = %status, "Search backend returned an error status.");
	}

	let bytes = res.error_for_status()?.bytes().await?;
	let body = String::from_utf8(bytes.to_vec()).map_err(|err| Error::InvalidResponse {
		message: format!("Search response from {url} is not valid UTF-8: {err}."),
	})?;
	let results = gsa::parse_results(&body, Some(&url))?;

	tracing::info!(url = %url, result_count = results.len(), "Fetched search results.");

	Ok(Some(results))
}
