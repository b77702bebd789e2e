//! Search appliance wire protocol: request URLs and XML result extraction.

use roxmltree::{Document, Node};
use url::{Url, form_urlencoded};

use crate::{Error, PolicyConfig, QueryOptions, Result, SIZE_UNKNOWN, SearchResult};

pub const DEFAULT_FRONTEND: &str = "default_frontend";
pub const DEFAULT_COLLECTION: &str = "default_collection";
pub const PROXY_STYLESHEET_PARAM: &str = "&proxystylesheet=default_frontend";

const HTTP_SCHEME: &str = "http://";
const SEARCH_PATH: &str = "/search";
const OUTPUT_PARAM: &str = "&output=xml_no_dtd";

const RESULTS_TAG: &str = "RES";
const RESULT_TAG: &str = "R";
const TITLE_TAG: &str = "T";
const URL_TAG: &str = "U";
const SNIPPET_TAG: &str = "S";
const HAS_TAG: &str = "HAS";
const CACHE_TAG: &str = "C";
const SIZE_ATTR: &str = "SZ";
const INDENT_ATTR: &str = "L";

/// Which flavor of request URL to build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequestStyle {
	/// Rendered through the appliance stylesheet, suitable for a browser frame.
	Styled,
	/// Raw XML, suitable for [`parse_results`].
	Raw,
}

pub fn encode(raw: &str) -> String {
	form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

pub fn base_url(host: &str) -> String {
	if host.starts_with(HTTP_SCHEME) {
		format!("{host}{SEARCH_PATH}")
	} else {
		format!("{HTTP_SCHEME}{host}{SEARCH_PATH}")
	}
}

pub fn request_url(policy: &PolicyConfig, options: &QueryOptions, style: RequestStyle) -> String {
	let arguments = &policy.arguments;
	let frontend =
		if arguments.frontend.is_empty() { DEFAULT_FRONTEND } else { arguments.frontend.as_str() };
	let collection = if arguments.collection.is_empty() {
		DEFAULT_COLLECTION
	} else {
		arguments.collection.as_str()
	};
	let mut url = base_url(&policy.host);

	url.push_str("?q=");
	url.push_str(&encode(options.query()));
	url.push_str("&client=");
	url.push_str(&encode(frontend));
	url.push_str("&site=");
	url.push_str(&encode(collection));
	url.push_str("&num=");
	url.push_str(&options.num_results().to_string());
	url.push_str(OUTPUT_PARAM);

	if style == RequestStyle::Styled {
		url.push_str(PROXY_STYLESHEET_PARAM);
	}
	if !arguments.extra_params.is_empty() {
		if !arguments.extra_params.starts_with('&') {
			url.push('&');
		}

		url.push_str(&arguments.extra_params);
	}

	url
}

/// Extracts results from a raw XML response, in document order.
///
/// A document without a results container yields no results. A result without a URL, with an
/// unparsable URL, or with a non-numeric indent fails the whole extraction. Relative result URLs
/// resolve against `base`, normally the request URL; without a base they are unparsable.
pub fn parse_results(body: &str, base: Option<&Url>) -> Result<Vec<SearchResult>> {
	let document = Document::parse(body)?;
	let Some(container) = document.descendants().find(|node| node.has_tag_name(RESULTS_TAG))
	else {
		return Ok(Vec::new());
	};

	container
		.children()
		.filter(|node| node.has_tag_name(RESULT_TAG))
		.map(|node| parse_result(node, base))
		.collect()
}

fn parse_result(node: Node<'_, '_>, base: Option<&Url>) -> Result<SearchResult> {
	let title = child(node, TITLE_TAG).map(text_of);
	let snippet = child(node, SNIPPET_TAG).map(text_of).unwrap_or_default();
	let url_text = child(node, URL_TAG).map(text_of).ok_or_else(|| Error::InvalidResponse {
		message: format!("Result element is missing its {URL_TAG} sub-element."),
	})?;
	let url = Url::options().base_url(base).parse(&url_text)?;
	let size = child(node, HAS_TAG)
		.and_then(|has| child(has, CACHE_TAG))
		.and_then(|cache| cache.attribute(SIZE_ATTR))
		.map(str::to_string)
		.unwrap_or_else(|| SIZE_UNKNOWN.to_string());
	let crowded = match node.attribute(INDENT_ATTR) {
		Some(raw) => {
			let indent = raw.parse::<i32>().map_err(|_| Error::InvalidResponse {
				message: format!("Result indent {raw:?} is not an integer."),
			})?;

			indent > 1
		},
		None => false,
	};
	let title = title.unwrap_or(url_text);

	Ok(SearchResult::new(url, title, snippet, size, crowded))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
	node.children().find(|child| child.has_tag_name(tag))
}

fn text_of(node: Node<'_, '_>) -> String {
	node.descendants().filter(Node::is_text).filter_map(|text| text.text()).collect()
}
