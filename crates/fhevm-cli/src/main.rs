// SPDX-License-Identifier: GPL-3.0

mod cli;
mod commands;
mod style;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, styles=style::get_styles())]
pub struct Cli {
	#[command(subcommand)]
	command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	let output = cli.command.execute().await?;
	if let Some(output) = output {
		println!("{}", serde_json::to_string_pretty(&output)?);
	}
	Ok(())
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}
