mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Http, ProfileConfig, ProfileKind, Query, Service};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.http.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "http.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.query.default_num_results == 0 {
		return Err(Error::Validation {
			message: "query.default_num_results must be greater than zero.".to_string(),
		});
	}
	if cfg.profiles.is_empty() {
		return Err(Error::Validation {
			message: "At least one [[profiles]] entry is required.".to_string(),
		});
	}

	let mut seen = HashSet::new();

	for profile in &cfg.profiles {
		if profile.name.is_empty() {
			return Err(Error::Validation {
				message: "profiles.name must be non-empty.".to_string(),
			});
		}
		if !seen.insert(profile.name.as_str()) {
			return Err(Error::Validation {
				message: format!("Profile name {:?} is defined more than once.", profile.name),
			});
		}
		if profile.kind == ProfileKind::Gsa && profile.host.is_none() {
			return Err(Error::Validation {
				message: format!(
					"Profile {:?} has kind gsa and must set a non-empty host.",
					profile.name
				),
			});
		}
		if profile.kind == ProfileKind::UrlPrefix && profile.url_prefix.is_none() {
			return Err(Error::Validation {
				message: format!(
					"Profile {:?} has kind url_prefix and must set a non-empty url_prefix.",
					profile.name
				),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.http.user_agent.as_deref().map(|agent| agent.trim().is_empty()).unwrap_or(false) {
		cfg.http.user_agent = None;
	}

	for profile in &mut cfg.profiles {
		profile.name = profile.name.trim().to_string();

		if profile.host.as_deref().map(|host| host.trim().is_empty()).unwrap_or(false) {
			profile.host = None;
		}
		if profile.url_prefix.as_deref().map(|prefix| prefix.trim().is_empty()).unwrap_or(false) {
			profile.url_prefix = None;
		}
	}
}
