use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Per-request parameters supplied by the caller.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct QueryOptions {
	query: String,
	num_results: u32,
}
impl QueryOptions {
	pub fn new(query: impl Into<String>, num_results: u32) -> Result<Self> {
		if num_results == 0 {
			return Err(Error::InvalidArgument {
				message: "num_results must be greater than zero.".to_string(),
			});
		}

		Ok(Self { query: query.into(), num_results })
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn num_results(&self) -> u32 {
		self.num_results
	}
}

/// Per-policy arguments forwarded to the backend. Empty strings select the backend default.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct QueryArguments {
	pub collection: String,
	pub frontend: String,
	pub extra_params: String,
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PolicyConfig {
	pub host: String,
	pub arguments: QueryArguments,
}
impl PolicyConfig {
	pub fn new(host: impl Into<String>, arguments: QueryArguments) -> Self {
		Self { host: host.into(), arguments }
	}
}
