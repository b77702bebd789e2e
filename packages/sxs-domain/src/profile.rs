use serde::Serialize;

use sxs_config::{Config, ProfileConfig, ProfileKind};

use crate::{Error, PolicyConfig, QueryArguments, QueryFormatter, Result};

static EMPTY_FORMATTER: QueryFormatter = QueryFormatter::Empty;

/// A named formatter an assessor can pick for one side of a comparison.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ScoringPolicyProfile {
	name: String,
	formatter: QueryFormatter,
}
impl ScoringPolicyProfile {
	pub fn new(name: impl Into<String>, formatter: QueryFormatter) -> Result<Self> {
		let name = name.into();

		if name.is_empty() {
			return Err(Error::InvalidArgument {
				message: "Profile name must be non-empty.".to_string(),
			});
		}
		if formatter.is_empty() {
			return Err(Error::InvalidArgument {
				message: format!("Profile {name:?} cannot wrap the empty formatter."),
			});
		}

		Ok(Self { name, formatter })
	}

	pub fn from_config(cfg: &ProfileConfig) -> Result<Self> {
		let formatter = match cfg.kind {
			ProfileKind::Gsa => {
				let host = cfg.host.clone().ok_or_else(|| Error::InvalidArgument {
					message: format!("Profile {:?} is missing its host.", cfg.name),
				})?;

				QueryFormatter::gsa(PolicyConfig::new(
					host,
					QueryArguments {
						collection: cfg.collection.clone(),
						frontend: cfg.frontend.clone(),
						extra_params: cfg.extra_params.clone(),
					},
				))?
			},
			ProfileKind::UrlPrefix => {
				let prefix = cfg.url_prefix.clone().ok_or_else(|| Error::InvalidArgument {
					message: format!("Profile {:?} is missing its url_prefix.", cfg.name),
				})?;

				QueryFormatter::url_prefix(prefix)?
			},
		};

		Self::new(cfg.name.clone(), formatter)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn formatter(&self) -> &QueryFormatter {
		&self.formatter
	}

	/// Formatter of a comparison slot; an unfilled slot behaves as the empty formatter.
	pub fn slot_formatter(slot: Option<&Self>) -> &QueryFormatter {
		slot.map(Self::formatter).unwrap_or(&EMPTY_FORMATTER)
	}
}

/// Builds every configured profile, in configuration order.
pub fn profiles_from_config(cfg: &Config) -> Result<Vec<ScoringPolicyProfile>> {
	cfg.profiles.iter().map(ScoringPolicyProfile::from_config).collect()
}
