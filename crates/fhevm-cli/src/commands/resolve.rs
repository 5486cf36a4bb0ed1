// SPDX-License-Identifier: GPL-3.0

use crate::{cli::traits::*, style::format_url};
use anyhow::Result;
use clap::Args;
use fhevm_instance::{ChainId, ChainResolution, MockChains, NetworkTarget, resolve};
use serde::Serialize;
use url::Url;

#[derive(Args)]
pub(crate) struct ResolveArgs {
	/// RPC URL of the node, e.g. http://localhost:8545.
	pub(crate) rpc_url: Url,
	/// Treat a chain as a local development network served at the given URL, as
	/// `<CHAIN_ID>=<RPC_URL>`. Can be repeated; merged over the built-in 31337 mapping.
	#[arg(long = "mock-chain", value_name = "ID=URL", value_parser = parse_mock_chain)]
	pub(crate) mock_chains: Vec<(ChainId, Url)>,
	/// Print the result as JSON.
	#[arg(long)]
	pub(crate) json: bool,
}

/// The outcome of a resolution, as printed in JSON mode.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Resolved {
	chain_id: ChainId,
	mock: bool,
	rpc_url: Option<Url>,
}

impl From<&ChainResolution> for Resolved {
	fn from(resolution: &ChainResolution) -> Self {
		Self {
			chain_id: resolution.chain_id(),
			mock: resolution.is_mock(),
			rpc_url: resolution.rpc_url().cloned(),
		}
	}
}

impl ResolveArgs {
	/// Executes the command.
	pub(crate) async fn execute(self, cli: &mut impl Cli) -> Result<Resolved> {
		cli.intro("Resolve chain")?;
		let overrides: MockChains = self.mock_chains.into_iter().collect();
		let target = NetworkTarget::Url(self.rpc_url.clone());

		let spinner = cli.spinner();
		let url = format_url(&self.rpc_url, cli.is_json());
		spinner.start(&format!("Reading the chain id from {url}..."));
		let resolution = match resolve(&target, Some(&overrides)).await {
			Ok(resolution) => resolution,
			Err(e) => {
				spinner.error("Unable to read the chain id");
				cli.outro_cancel(format!("🚫 {e}"))?;
				return Err(e.into());
			},
		};
		spinner.stop(&format!("Chain id: {}", resolution.chain_id()));

		match &resolution {
			ChainResolution::Mock { rpc_url, .. } => {
				cli.info(format!("Local development network at {rpc_url}"))?;
			},
			ChainResolution::Generic { .. } => {
				cli.info("Network served by the hosted relayer")?;
			},
		}
		cli.outro("Chain resolved")?;
		Ok(Resolved::from(&resolution))
	}
}

/// Parse a `<CHAIN_ID>=<RPC_URL>` mock chain mapping. The chain id may be decimal or
/// `0x`-prefixed hex.
fn parse_mock_chain(value: &str) -> Result<(ChainId, Url), String> {
	let (id, url) = value
		.split_once('=')
		.ok_or_else(|| format!("expected `<CHAIN_ID>=<RPC_URL>`, got `{value}`"))?;
	let id = id.trim();
	let chain_id = match id.strip_prefix("0x") {
		Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) =>
			ChainId::from_str_radix(hex, 16),
		None if id.bytes().all(|b| b.is_ascii_digit()) => id.parse(),
		_ => return Err(format!("invalid chain id `{id}`")),
	}
	.map_err(|e| format!("invalid chain id `{id}`: {e}"))?;
	let url = Url::parse(url.trim()).map_err(|e| format!("invalid RPC URL `{url}`: {e}"))?;
	Ok((chain_id, url))
}
