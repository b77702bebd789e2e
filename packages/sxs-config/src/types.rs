use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub http: Http,
	#[serde(default)]
	pub query: Query,
	pub profiles: Vec<ProfileConfig>,
}
impl Config {
	pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
		self.profiles.iter().find(|profile| profile.name == name)
	}
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Settings for the HTTP client built by the caller. The formatter layer itself imposes no
/// timeout.
#[derive(Debug, Deserialize)]
pub struct Http {
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	pub user_agent: Option<String>,
}
impl Default for Http {
	fn default() -> Self {
		Self { timeout_ms: default_timeout_ms(), user_agent: None }
	}
}

#[derive(Debug, Deserialize)]
pub struct Query {
	#[serde(default = "default_num_results")]
	pub default_num_results: u32,
}
impl Default for Query {
	fn default() -> Self {
		Self { default_num_results: default_num_results() }
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
	Gsa,
	UrlPrefix,
}
impl ProfileKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Gsa => "gsa",
			Self::UrlPrefix => "url_prefix",
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProfileConfig {
	pub name: String,
	pub kind: ProfileKind,
	/// Required when `kind = "gsa"`.
	pub host: Option<String>,
	/// Empty means the appliance's default collection.
	#[serde(default)]
	pub collection: String,
	/// Empty means the appliance's default frontend.
	#[serde(default)]
	pub frontend: String,
	#[serde(default)]
	pub extra_params: String,
	/// Required when `kind = "url_prefix"`.
	pub url_prefix: Option<String>,
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_num_results() -> u32 {
	10
}
