use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use sxs_config::{Config, Error, ProfileKind};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("sxs_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn sample_toml_with_profile_field(index: usize, key: &str, value: Value) -> String {
	let mut value_root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let profiles = value_root
		.get_mut("profiles")
		.and_then(Value::as_array_mut)
		.expect("Sample config must include [[profiles]].");
	let profile = profiles
		.get_mut(index)
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested profile.");

	profile.insert(key.to_string(), value);

	toml::to_string(&value_root).expect("Failed to render sample config.")
}

fn load_payload(payload: String) -> sxs_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = sxs_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_is_valid() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.profiles.len(), 3);
	assert_eq!(cfg.http.timeout_ms, 5_000);
	assert_eq!(cfg.query.default_num_results, 10);

	let vendor = cfg.profile("vendor").expect("Missing vendor profile.");

	assert_eq!(vendor.kind, ProfileKind::UrlPrefix);
	assert_eq!(vendor.url_prefix.as_deref(), Some("https://www.example.com/search?q="));

	let baseline = cfg.profile("baseline").expect("Missing baseline profile.");

	assert_eq!(baseline.kind, ProfileKind::Gsa);
	assert!(baseline.frontend.is_empty());
}

#[test]
fn http_and_query_sections_default_when_absent() {
	let payload = r#"
[service]
log_level = "debug"

[[profiles]]
name = "only"
kind = "gsa"
host = "gsa.internal"
"#;
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert_eq!(cfg.http.timeout_ms, 10_000);
	assert!(cfg.http.user_agent.is_none());
	assert_eq!(cfg.query.default_num_results, 10);

	let only = cfg.profile("only").expect("Missing profile.");

	assert!(only.collection.is_empty());
	assert!(only.extra_params.is_empty());
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("sxs_config_test_definitely_missing.toml");

	let err = sxs_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn unknown_profile_kind_is_a_parse_error() {
	let payload = sample_toml_with_profile_field(0, "kind", Value::String("solr".to_string()));
	let err = load_payload(payload).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn gsa_profile_requires_host() {
	let payload = sample_toml_with_profile_field(0, "host", Value::String("   ".to_string()));
	let err = load_payload(payload).expect_err("Expected host validation error.");

	assert!(
		err.to_string().contains("has kind gsa and must set a non-empty host."),
		"Unexpected error: {err}"
	);
}

#[test]
fn url_prefix_profile_requires_prefix() {
	let payload = sample_toml_with_profile_field(2, "url_prefix", Value::String(String::new()));
	let err = load_payload(payload).expect_err("Expected url_prefix validation error.");

	assert!(
		err.to_string().contains("has kind url_prefix and must set a non-empty url_prefix."),
		"Unexpected error: {err}"
	);
}

#[test]
fn profile_names_are_trimmed_and_must_be_unique() {
	let payload =
		sample_toml_with_profile_field(1, "name", Value::String("  baseline ".to_string()));
	let err = load_payload(payload).expect_err("Expected duplicate name error.");

	assert!(
		err.to_string().contains("Profile name \"baseline\" is defined more than once."),
		"Unexpected error: {err}"
	);
}

#[test]
fn timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.http.timeout_ms = 0;

	let err = sxs_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("http.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_num_results_must_be_positive() {
	let mut cfg = base_config();

	cfg.query.default_num_results = 0;

	let err = sxs_config::validate(&cfg).expect_err("Expected num results validation error.");

	assert!(
		err.to_string().contains("query.default_num_results must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn at_least_one_profile_is_required() {
	let mut cfg = base_config();

	cfg.profiles.clear();

	let err = sxs_config::validate(&cfg).expect_err("Expected profiles validation error.");

	assert!(
		err.to_string().contains("At least one [[profiles]] entry is required."),
		"Unexpected error: {err}"
	);
}
