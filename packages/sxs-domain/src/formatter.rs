use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
	Error, PolicyConfig, QueryArguments, QueryOptions, Result,
	gsa::{self, RequestStyle},
};

const SAMPLE_QUERY: &str = "sample query";

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
	Empty,
	UrlPrefix,
	Gsa,
}
impl FormatterKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Empty => "empty",
			Self::UrlPrefix => "url_prefix",
			Self::Gsa => "gsa",
		}
	}
}

/// Turns query options into backend requests. The set of backends is closed.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryFormatter {
	/// No backend configured. Every operation yields nothing.
	Empty,
	UrlPrefix(UrlPrefixFormatter),
	Gsa(GsaFormatter),
}
impl QueryFormatter {
	pub fn url_prefix(prefix: impl Into<String>) -> Result<Self> {
		UrlPrefixFormatter::new(prefix).map(Self::UrlPrefix)
	}

	pub fn gsa(policy: PolicyConfig) -> Result<Self> {
		GsaFormatter::new(policy).map(Self::Gsa)
	}

	pub fn kind(&self) -> FormatterKind {
		match self {
			Self::Empty => FormatterKind::Empty,
			Self::UrlPrefix(_) => FormatterKind::UrlPrefix,
			Self::Gsa(_) => FormatterKind::Gsa,
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	pub fn prefix(&self) -> Option<&str> {
		match self {
			Self::UrlPrefix(formatter) => Some(formatter.prefix()),
			_ => None,
		}
	}

	pub fn policy_config(&self) -> Option<&PolicyConfig> {
		match self {
			Self::Gsa(formatter) => Some(formatter.policy()),
			_ => None,
		}
	}

	/// URI of a human-viewable backend response for embedding in a page.
	pub fn create_query_uri(&self, options: &QueryOptions) -> Option<Url> {
		match self {
			Self::Empty => None,
			Self::UrlPrefix(formatter) => Some(formatter.create_query_uri(options)),
			Self::Gsa(formatter) => Some(formatter.create_query_uri(options)),
		}
	}

	/// URI whose response can be parsed into results, or `None` when the backend returns no
	/// structured results.
	pub fn results_uri(&self, options: &QueryOptions) -> Option<Url> {
		match self {
			Self::Gsa(formatter) => Some(formatter.results_uri(options)),
			Self::Empty | Self::UrlPrefix(_) => None,
		}
	}

	pub fn supports_results(&self) -> bool {
		matches!(self, Self::Gsa(_))
	}
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "UrlPrefixFields")]
pub struct UrlPrefixFormatter {
	url_prefix: String,
}
impl UrlPrefixFormatter {
	/// Rejects prefixes that cannot form a URI once a query is appended.
	pub fn new(prefix: impl Into<String>) -> Result<Self> {
		let url_prefix = prefix.into();

		Url::parse(&format!("{url_prefix}{}", gsa::encode(SAMPLE_QUERY))).map_err(|err| {
			Error::InvalidArgument { message: format!("URL prefix {url_prefix:?} is invalid: {err}.") }
		})?;

		Ok(Self { url_prefix })
	}

	pub fn prefix(&self) -> &str {
		&self.url_prefix
	}

	/// # Panics
	///
	/// Never in practice: the prefix is validated at construction and the query is
	/// percent-encoded.
	pub fn create_query_uri(&self, options: &QueryOptions) -> Url {
		parse_built(format!("{}{}", self.url_prefix, gsa::encode(options.query())))
	}
}

#[derive(Deserialize)]
struct UrlPrefixFields {
	url_prefix: String,
}
impl TryFrom<UrlPrefixFields> for UrlPrefixFormatter {
	type Error = Error;

	fn try_from(fields: UrlPrefixFields) -> Result<Self> {
		Self::new(fields.url_prefix)
	}
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "GsaFields")]
pub struct GsaFormatter {
	policy: PolicyConfig,
}
impl GsaFormatter {
	/// Rejects hosts that cannot form a URI and extra parameters that would not survive in the
	/// query string verbatim. Extra parameters must already be percent-encoded.
	pub fn new(policy: PolicyConfig) -> Result<Self> {
		if policy.host.is_empty() {
			return Err(Error::InvalidArgument { message: "GSA host must be non-empty.".to_string() });
		}

		let sample = QueryOptions::new(SAMPLE_QUERY, 1)?;
		let url = Url::parse(&gsa::request_url(&policy, &sample, RequestStyle::Styled)).map_err(
			|err| Error::InvalidArgument {
				message: format!("GSA host {:?} does not form a valid URI: {err}.", policy.host),
			},
		)?;
		let extra_params = policy.arguments.extra_params.trim_start_matches('&');

		if !extra_params.is_empty()
			&& !url.query().is_some_and(|query| query.ends_with(extra_params))
		{
			return Err(Error::InvalidArgument {
				message: format!(
					"GSA extra parameters {:?} must be percent-encoded query parameters.",
					policy.arguments.extra_params
				),
			});
		}

		Ok(Self { policy })
	}

	pub fn policy(&self) -> &PolicyConfig {
		&self.policy
	}

	pub fn arguments(&self) -> &QueryArguments {
		&self.policy.arguments
	}

	/// Styled request URI.
	///
	/// # Panics
	///
	/// Never in practice: the host is validated at construction and every appended value is
	/// percent-encoded.
	pub fn create_query_uri(&self, options: &QueryOptions) -> Url {
		parse_built(gsa::request_url(&self.policy, options, RequestStyle::Styled))
	}

	/// Raw XML request URI.
	///
	/// # Panics
	///
	/// Same as [`Self::create_query_uri`].
	pub fn results_uri(&self, options: &QueryOptions) -> Url {
		parse_built(gsa::request_url(&self.policy, options, RequestStyle::Raw))
	}
}

#[derive(Deserialize)]
struct GsaFields {
	policy: PolicyConfig,
}
impl TryFrom<GsaFields> for GsaFormatter {
	type Error = Error;

	fn try_from(fields: GsaFields) -> Result<Self> {
		Self::new(fields.policy)
	}
}

fn parse_built(raw: String) -> Url {
	match Url::parse(&raw) {
		Ok(url) => url,
		Err(err) => panic!("Built query URI {raw:?} is invalid: {err}."),
	}
}
