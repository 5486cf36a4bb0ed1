// SPDX-License-Identifier: GPL-3.0

//! Chain resolution.
//!
//! Determines which chain a [`NetworkTarget`] points at and whether that chain is a
//! local development ("mock") network or a real network served by the hosted relayer.

use crate::{
	NetworkTarget, RpcClient,
	error::RpcClientError,
	rpc::parse_chain_id,
	strings::rpc::{dev_node, methods},
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use url::Url;

/// Numeric chain identifier.
pub type ChainId = u32;

static DEFAULT_MOCK_CHAINS: Lazy<MockChains> = Lazy::new(|| {
	let url = Url::parse(dev_node::RPC_URL).expect("default development RPC URL is valid");
	MockChains::new().with(dev_node::CHAIN_ID, url)
});

/// Mapping of chain ids treated as local development networks to their RPC URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockChains(BTreeMap<ChainId, Url>);

impl MockChains {
	/// An empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// The built-in mapping: the default development node on loopback.
	pub fn defaults() -> &'static MockChains {
		&DEFAULT_MOCK_CHAINS
	}

	/// Add (or replace) `chain_id`, returning the updated mapping.
	pub fn with(mut self, chain_id: ChainId, rpc_url: Url) -> Self {
		self.0.insert(chain_id, rpc_url);
		self
	}

	/// Add (or replace) `chain_id`, returning the URL it was previously mapped to.
	pub fn insert(&mut self, chain_id: ChainId, rpc_url: Url) -> Option<Url> {
		self.0.insert(chain_id, rpc_url)
	}

	/// The RPC URL `chain_id` is mapped to.
	pub fn get(&self, chain_id: ChainId) -> Option<&Url> {
		self.0.get(&chain_id)
	}

	/// Whether `chain_id` is a mock chain.
	pub fn contains(&self, chain_id: ChainId) -> bool {
		self.0.contains_key(&chain_id)
	}

	/// Iterate over the mapping in ascending chain id order.
	pub fn iter(&self) -> impl Iterator<Item = (ChainId, &Url)> {
		self.0.iter().map(|(id, url)| (*id, url))
	}

	/// The defaults with `overrides` merged over them. Overrides win on collision.
	pub fn effective(overrides: Option<&MockChains>) -> MockChains {
		let mut chains = Self::defaults().clone();
		if let Some(overrides) = overrides {
			chains.0.extend(overrides.0.iter().map(|(id, url)| (*id, url.clone())));
		}
		chains
	}
}

impl FromIterator<(ChainId, Url)> for MockChains {
	fn from_iter<I: IntoIterator<Item = (ChainId, Url)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Outcome of resolving a [`NetworkTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainResolution {
	/// A local development network. The RPC URL is always known.
	Mock {
		/// The resolved chain id.
		chain_id: ChainId,
		/// The caller's URL, or the mapped default for provider targets.
		rpc_url: Url,
	},
	/// Any other network.
	Generic {
		/// The resolved chain id.
		chain_id: ChainId,
		/// The caller's URL; absent for provider targets.
		rpc_url: Option<Url>,
	},
}

impl ChainResolution {
	/// Whether the target is a local development network.
	pub fn is_mock(&self) -> bool {
		matches!(self, Self::Mock { .. })
	}

	/// The resolved chain id.
	pub fn chain_id(&self) -> ChainId {
		match self {
			Self::Mock { chain_id, .. } | Self::Generic { chain_id, .. } => *chain_id,
		}
	}

	/// The effective RPC URL, if any.
	pub fn rpc_url(&self) -> Option<&Url> {
		match self {
			Self::Mock { rpc_url, .. } => Some(rpc_url),
			Self::Generic { rpc_url, .. } => rpc_url.as_ref(),
		}
	}
}

/// Read the chain id of `target`.
///
/// URL targets are queried over a transient connection; providers are asked
/// through their own `request` method. Errors are not retried.
pub async fn chain_id(target: &NetworkTarget) -> Result<ChainId, RpcClientError> {
	match target {
		NetworkTarget::Url(url) => {
			let client = RpcClient::connect(url)?;
			client.chain_id().await
		},
		NetworkTarget::Provider(provider) => {
			let value = provider.request(methods::ETH_CHAIN_ID, vec![]).await?;
			parse_chain_id(&value)
		},
	}
}

/// Resolve `target` into a [`ChainResolution`].
///
/// # Arguments
/// * `target` - The provider or RPC URL to resolve.
/// * `mock_chains` - Mock chain mappings merged over [`MockChains::defaults`].
pub async fn resolve(
	target: &NetworkTarget,
	mock_chains: Option<&MockChains>,
) -> Result<ChainResolution, RpcClientError> {
	let chain_id = chain_id(target).await?;
	let rpc_url = target.url().cloned();
	let resolution = match MockChains::effective(mock_chains).get(chain_id) {
		Some(mapped) =>
			ChainResolution::Mock { chain_id, rpc_url: rpc_url.unwrap_or_else(|| mapped.clone()) },
		None => ChainResolution::Generic { chain_id, rpc_url },
	};
	log::debug!("resolved {target:?} to {resolution:?}");
	Ok(resolution)
}
