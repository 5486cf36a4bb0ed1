// SPDX-License-Identifier: GPL-3.0

use crate::{cli::traits::*, style::format_url};
use anyhow::Result;
use clap::Args;
use fhevm_instance::{MockRelayerMetadata, probe::try_probe};
use serde_json::Value;
use url::Url;

#[derive(Args)]
pub(crate) struct ProbeArgs {
	/// RPC URL of the node, e.g. http://localhost:8545.
	pub(crate) rpc_url: Url,
	/// Print the metadata as JSON (`null` when the node serves none).
	#[arg(long)]
	pub(crate) json: bool,
}

impl ProbeArgs {
	/// Executes the command.
	pub(crate) async fn execute(self, cli: &mut impl Cli) -> Result<Option<MockRelayerMetadata>> {
		cli.intro("Probe development node")?;

		let spinner = cli.spinner();
		spinner.start(&format!("Querying {}...", format_url(&self.rpc_url, cli.is_json())));
		let metadata = match try_probe(&self.rpc_url).await {
			Ok(metadata) => metadata,
			Err(e) => {
				spinner.error("Unable to query the node");
				cli.outro_cancel(format!("🚫 {e}"))?;
				return Err(e.into());
			},
		};

		let Some(metadata) = metadata else {
			spinner.stop("No relayer metadata");
			cli.warning("The node is not an FHEVM development node or serves no relayer metadata")?;
			cli.outro("Instances for this network are created through the relayer SDK")?;
			return Ok(None);
		};
		spinner.stop("Development node found");
		for (key, value) in metadata.as_map() {
			cli.info(format!("{key}: {}", display(value)))?;
		}
		cli.success("Instances for this network can be built locally")?;
		cli.outro("Relayer metadata available")?;
		Ok(Some(metadata))
	}
}

fn display(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
