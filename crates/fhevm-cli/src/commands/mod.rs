// SPDX-License-Identifier: GPL-3.0

use crate::cli::Cli;
use clap::Subcommand;
use serde_json::Value;

pub(crate) mod probe;
pub(crate) mod resolve;

#[derive(Subcommand)]
#[command(subcommand_required = true)]
pub(crate) enum Command {
	/// Resolve the chain an RPC endpoint serves and whether it is a development network.
	#[clap(alias = "r")]
	Resolve(resolve::ResolveArgs),
	/// Probe an RPC endpoint for development node relayer metadata.
	#[clap(alias = "p")]
	Probe(probe::ProbeArgs),
}

impl Command {
	/// Executes the command, returning the document to print when JSON output is requested.
	pub(crate) async fn execute(self) -> anyhow::Result<Option<Value>> {
		match self {
			Self::Resolve(args) => {
				let mut cli = Cli { json: args.json };
				let output = args.execute(&mut cli).await?;
				json_output(cli.json, &output)
			},
			Self::Probe(args) => {
				let mut cli = Cli { json: args.json };
				let output = args.execute(&mut cli).await?;
				json_output(cli.json, &output)
			},
		}
	}
}

fn json_output(json: bool, output: &impl serde::Serialize) -> anyhow::Result<Option<Value>> {
	Ok(if json { Some(serde_json::to_value(output)?) } else { None })
}
