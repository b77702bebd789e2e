use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use sxs_config::Config;
use sxs_domain::{
	Judgment, JudgmentRecord, QueryFormatter, QueryOptions, ScoringPolicyProfile, SearchResult,
};

#[derive(Debug, Parser)]
#[command(
	version = sxs_cli::VERSION,
	rename_all = "kebab",
	styles = sxs_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// List the configured scoring policy profiles.
	Profiles,
	/// Print the human-viewable request URI of each side.
	Uri(SlotArgs),
	/// Fetch both result sets and report whether they are identical.
	Capture(SlotArgs),
	/// Record a verdict for a comparison.
	Judge(JudgeArgs),
}

#[derive(Debug, clap::Args)]
pub struct SlotArgs {
	#[arg(long, value_name = "PROFILE")]
	pub first: String,
	#[arg(long, value_name = "PROFILE")]
	pub second: Option<String>,
	#[arg(long, short = 'q')]
	pub query: String,
	#[arg(long, value_name = "N")]
	pub num: Option<u32>,
}

#[derive(Debug, clap::Args)]
pub struct JudgeArgs {
	#[arg(long, value_name = "PROFILE")]
	pub first: String,
	#[arg(long, value_name = "PROFILE")]
	pub second: String,
	#[arg(long, short = 'q')]
	pub query: String,
	#[arg(long, value_enum)]
	pub verdict: Verdict,
	#[arg(long, value_name = "ID")]
	pub results_id: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Verdict {
	FirstBetter,
	Equal,
	SecondBetter,
}
impl From<Verdict> for Judgment {
	fn from(verdict: Verdict) -> Self {
		match verdict {
			Verdict::FirstBetter => Judgment::FirstBetter,
			Verdict::Equal => Judgment::Equal,
			Verdict::SecondBetter => Judgment::SecondBetter,
		}
	}
}

#[derive(Debug, Serialize)]
struct ProfileSummary {
	name: String,
	kind: &'static str,
}

#[derive(Debug, Serialize)]
struct UriOutput {
	query: String,
	num_results: u32,
	first: SlotUri,
	second: SlotUri,
}

#[derive(Debug, Serialize)]
struct SlotUri {
	profile: Option<String>,
	kind: &'static str,
	uri: Option<String>,
}

#[derive(Debug, Serialize)]
struct CaptureOutput {
	query: String,
	num_results: u32,
	first: SlotCapture,
	second: SlotCapture,
	#[serde(skip_serializing_if = "Option::is_none")]
	identical: Option<bool>,
}

#[derive(Debug, Serialize)]
struct SlotCapture {
	profile: Option<String>,
	kind: &'static str,
	supported: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	fingerprint: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	results: Option<Vec<SearchResult>>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = sxs_config::load(&args.config)?;
	let filter = EnvFilter::new(cfg.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let output = execute(&cfg, args.command).await?;
	let json = serde_json::to_string_pretty(&output)?;

	println!("{json}");

	Ok(())
}

/// Runs `command` against `cfg` and returns the JSON document to print.
pub async fn execute(cfg: &Config, command: Command) -> color_eyre::Result<Value> {
	let profiles = sxs_domain::profiles_from_config(cfg)?;

	match command {
		Command::Profiles => {
			let summaries: Vec<ProfileSummary> = profiles
				.iter()
				.map(|profile| ProfileSummary {
					name: profile.name().to_string(),
					kind: profile.formatter().kind().as_str(),
				})
				.collect();

			Ok(serde_json::to_value(summaries)?)
		},
		Command::Uri(slots) => Ok(serde_json::to_value(uri(cfg, &profiles, &slots)?)?),
		Command::Capture(slots) => {
			let output = capture(cfg, &profiles, &slots).await?;

			Ok(serde_json::to_value(output)?)
		},
		Command::Judge(judge_args) => Ok(serde_json::to_value(judge(&profiles, judge_args)?)?),
	}
}

fn uri(
	cfg: &Config,
	profiles: &[ScoringPolicyProfile],
	slots: &SlotArgs,
) -> color_eyre::Result<UriOutput> {
	let options = query_options(cfg, slots)?;
	let (first, second) = resolve_slots(profiles, slots)?;
	let slot_uri = |slot: Option<&ScoringPolicyProfile>| {
		let formatter = ScoringPolicyProfile::slot_formatter(slot);

		SlotUri {
			profile: slot.map(|profile| profile.name().to_string()),
			kind: formatter.kind().as_str(),
			uri: formatter.create_query_uri(&options).map(|uri| uri.to_string()),
		}
	};

	Ok(UriOutput {
		query: options.query().to_string(),
		num_results: options.num_results(),
		first: slot_uri(Some(first)),
		second: slot_uri(second),
	})
}

async fn capture(
	cfg: &Config,
	profiles: &[ScoringPolicyProfile],
	slots: &SlotArgs,
) -> color_eyre::Result<CaptureOutput> {
	let options = query_options(cfg, slots)?;
	let (first, second) = resolve_slots(profiles, slots)?;
	let client = sxs_providers::http_client(&cfg.http)?;
	let first_formatter = first.formatter();
	let second_formatter = ScoringPolicyProfile::slot_formatter(second);
	let (first_results, second_results) = tokio::join!(
		sxs_providers::search_results(&client, first_formatter, &options),
		sxs_providers::search_results(&client, second_formatter, &options),
	);
	let first_capture = slot_capture(Some(first), first_formatter, first_results?);
	let second_capture = slot_capture(second, second_formatter, second_results?);
	let identical = match (&first_capture.fingerprint, &second_capture.fingerprint) {
		(Some(a), Some(b)) => Some(a == b),
		_ => None,
	};

	tracing::info!(
		query = options.query(),
		first = first.name(),
		second = second.map(ScoringPolicyProfile::name).unwrap_or(""),
		identical = ?identical,
		"Captured result sets."
	);

	Ok(CaptureOutput {
		query: options.query().to_string(),
		num_results: options.num_results(),
		first: first_capture,
		second: second_capture,
		identical,
	})
}

fn judge(
	profiles: &[ScoringPolicyProfile],
	judge_args: JudgeArgs,
) -> color_eyre::Result<JudgmentRecord> {
	let first = find_profile(profiles, &judge_args.first)?;
	let second = find_profile(profiles, &judge_args.second)?;

	Ok(JudgmentRecord::new(
		judge_args.query,
		judge_args.verdict.into(),
		now_millis()?,
		first.formatter().clone(),
		second.formatter().clone(),
		judge_args.results_id,
	))
}

fn slot_capture(
	slot: Option<&ScoringPolicyProfile>,
	formatter: &QueryFormatter,
	results: Option<Vec<SearchResult>>,
) -> SlotCapture {
	SlotCapture {
		profile: slot.map(|profile| profile.name().to_string()),
		kind: formatter.kind().as_str(),
		supported: results.is_some(),
		fingerprint: results.as_deref().map(sxs_domain::fingerprint),
		results,
	}
}

fn query_options(cfg: &Config, slots: &SlotArgs) -> color_eyre::Result<QueryOptions> {
	let num_results = slots.num.unwrap_or(cfg.query.default_num_results);

	Ok(QueryOptions::new(slots.query.clone(), num_results)?)
}

fn resolve_slots<'a>(
	profiles: &'a [ScoringPolicyProfile],
	slots: &SlotArgs,
) -> color_eyre::Result<(&'a ScoringPolicyProfile, Option<&'a ScoringPolicyProfile>)> {
	let first = find_profile(profiles, &slots.first)?;
	let second = slots.second.as_deref().map(|name| find_profile(profiles, name)).transpose()?;

	Ok((first, second))
}

fn find_profile<'a>(
	profiles: &'a [ScoringPolicyProfile],
	name: &str,
) -> color_eyre::Result<&'a ScoringPolicyProfile> {
	profiles
		.iter()
		.find(|profile| profile.name() == name)
		.ok_or_else(|| eyre::eyre!("Unknown profile {name:?}."))
}

fn now_millis() -> color_eyre::Result<i64> {
	let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

	Ok(i64::try_from(nanos / 1_000_000)?)
}

#[cfg(test)]
mod tests {
	use std::{
		env, fs,
		sync::atomic::{AtomicU64, Ordering},
	};

	use sxs_config::Config;

	use crate::{Command, JudgeArgs, SlotArgs, Verdict};

	const CONFIG: &str = r#"
[service]
log_level = "info"

[query]
default_num_results = 7

[[profiles]]
name = "baseline"
kind = "gsa"
host = "search.example.com"

[[profiles]]
name = "vendor"
kind = "url_prefix"
url_prefix = "https://www.example.com/search?q="
"#;

	fn config() -> Config {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let path = env::temp_dir()
			.join(format!("sxs_judge_unit_{}_{ordinal}.toml", std::process::id()));

		fs::write(&path, CONFIG).expect("Failed to write test config.");

		let cfg = sxs_config::load(&path);

		fs::remove_file(&path).expect("Failed to remove test config.");

		cfg.expect("Failed to load test config.")
	}

	fn slots(second: Option<&str>) -> SlotArgs {
		SlotArgs {
			first: "baseline".to_string(),
			second: second.map(str::to_string),
			query: "cats".to_string(),
			num: None,
		}
	}

	#[tokio::test]
	async fn uri_uses_default_num_and_empty_second_slot() {
		let output = crate::execute(&config(), Command::Uri(slots(None)))
			.await
			.expect("Uri command failed.");

		assert_eq!(output["num_results"], 7);
		assert_eq!(output["first"]["kind"], "gsa");
		assert_eq!(
			output["first"]["uri"],
			"http://search.example.com/search?q=cats&client=default_frontend&site=default_collection&num=7&output=xml_no_dtd&proxystylesheet=default_frontend"
		);
		assert_eq!(output["second"]["kind"], "empty");
		assert!(output["second"]["uri"].is_null());
		assert!(output["second"]["profile"].is_null());
	}

	#[tokio::test]
	async fn capture_marks_unsupported_sides() {
		let mut slots = slots(Some("vendor"));

		slots.first = "vendor".to_string();

		let output =
			crate::execute(&config(), Command::Capture(slots)).await.expect("Capture failed.");

		assert_eq!(output["first"]["supported"], false);
		assert_eq!(output["second"]["supported"], false);
		assert!(output.get("identical").is_none());
	}

	#[tokio::test]
	async fn unknown_profile_is_rejected() {
		let mut slots = slots(None);

		slots.first = "missing".to_string();

		let err = crate::execute(&config(), Command::Uri(slots))
			.await
			.expect_err("Expected unknown profile error.");

		assert!(err.to_string().contains("Unknown profile \"missing\"."), "Unexpected: {err}");
	}

	#[tokio::test]
	async fn zero_num_is_rejected() {
		let mut slots = slots(None);

		slots.num = Some(0);

		assert!(crate::execute(&config(), Command::Uri(slots)).await.is_err());
	}

	#[tokio::test]
	async fn judge_records_both_formatters() {
		let args = JudgeArgs {
			first: "baseline".to_string(),
			second: "vendor".to_string(),
			query: "cats".to_string(),
			verdict: Verdict::SecondBetter,
			results_id: Some("r-1".to_string()),
		};
		let output = crate::execute(&config(), Command::Judge(args)).await.expect("Judge failed.");

		assert_eq!(output["query"], "cats");
		assert_eq!(output["judgment"], "second_better");
		assert_eq!(output["first_formatter"]["kind"], "gsa");
		assert_eq!(output["second_formatter"]["kind"], "url_prefix");
		assert_eq!(output["results_id"], "r-1");
		assert!(output["timestamp"].as_i64().expect("Timestamp must be an integer.") > 0);
	}
}
