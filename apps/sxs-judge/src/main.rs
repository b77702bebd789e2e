// crates.io
use clap::Parser;
// self
use sxs_judge::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	sxs_judge::run(args).await
}
