use serde::{Deserialize, Serialize};

use crate::QueryFormatter;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
	FirstBetter,
	Equal,
	SecondBetter,
}
impl Judgment {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::FirstBetter => "first_better",
			Self::Equal => "equal",
			Self::SecondBetter => "second_better",
		}
	}
}

/// The verdict of one side-by-side comparison, handed to storage as-is.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct JudgmentRecord {
	query: String,
	judgment: Judgment,
	/// Milliseconds since the Unix epoch.
	timestamp: i64,
	first_formatter: QueryFormatter,
	second_formatter: QueryFormatter,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	results_id: Option<String>,
}
impl JudgmentRecord {
	pub fn new(
		query: impl Into<String>,
		judgment: Judgment,
		timestamp: i64,
		first_formatter: QueryFormatter,
		second_formatter: QueryFormatter,
		results_id: Option<String>,
	) -> Self {
		Self {
			query: query.into(),
			judgment,
			timestamp,
			first_formatter,
			second_formatter,
			results_id,
		}
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn judgment(&self) -> Judgment {
		self.judgment
	}

	pub fn timestamp(&self) -> i64 {
		self.timestamp
	}

	pub fn first_formatter(&self) -> &QueryFormatter {
		&self.first_formatter
	}

	pub fn second_formatter(&self) -> &QueryFormatter {
		&self.second_formatter
	}

	pub fn results_id(&self) -> Option<&str> {
		self.results_id.as_deref()
	}
}
