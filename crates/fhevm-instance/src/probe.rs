// SPDX-License-Identifier: GPL-3.0

//! Mock metadata probe.
//!
//! A chain id in the mock mapping is only a hint: the node must also identify itself
//! as a development node and serve relayer bootstrap metadata before a local instance
//! can be built. Anything short of that means "no metadata", and instance creation
//! continues on the regular relayer path.

use crate::{RpcClient, error::RpcClientError, strings::rpc::dev_node};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// Relayer bootstrap metadata served by an FHEVM development node.
///
/// Opaque to this crate apart from a few well-known contract addresses; the
/// mock instance factory receives it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockRelayerMetadata(Map<String, Value>);

impl MockRelayerMetadata {
	/// Wrap a metadata object.
	pub fn new(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	/// Look up a field by name.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Address of the ACL contract deployed on the development node.
	pub fn acl_address(&self) -> Option<&str> {
		self.string("ACLAddress")
	}

	/// Address of the input verifier contract deployed on the development node.
	pub fn input_verifier_address(&self) -> Option<&str> {
		self.string("InputVerifierAddress")
	}

	/// Address of the KMS verifier contract deployed on the development node.
	pub fn kms_verifier_address(&self) -> Option<&str> {
		self.string("KMSVerifierAddress")
	}

	/// All fields.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	fn string(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}
}

/// Whether a client version string identifies a development node.
pub fn is_dev_node(client_version: &str) -> bool {
	client_version.to_lowercase().contains(dev_node::CLIENT_VERSION_MARKER)
}

/// Probe `rpc_url` for relayer metadata.
///
/// Every failure, an unreachable node included, means `None`.
pub async fn probe(rpc_url: &Url) -> Option<MockRelayerMetadata> {
	try_probe(rpc_url).await.unwrap_or_else(|e| {
		log::debug!("unable to probe {rpc_url}: {e}");
		None
	})
}

/// Like [`probe`], but reports a failing client version request as an error so that
/// an unreachable node can be told apart.
///
/// Returns `Ok(None)` when the node does not identify as a development node, or
/// when the metadata request fails or returns something other than an object.
pub async fn try_probe(rpc_url: &Url) -> Result<Option<MockRelayerMetadata>, RpcClientError> {
	let version = client_version(rpc_url).await?;
	match version.as_deref() {
		Some(version) if is_dev_node(version) => {
			log::debug!("{rpc_url} is a development node ({version})");
		},
		other => {
			log::debug!("{rpc_url} is not a development node ({other:?})");
			return Ok(None);
		},
	}
	Ok(relayer_metadata(rpc_url).await)
}

async fn client_version(rpc_url: &Url) -> Result<Option<String>, RpcClientError> {
	let client = RpcClient::connect(rpc_url)?;
	client.client_version().await
}

async fn relayer_metadata(rpc_url: &Url) -> Option<MockRelayerMetadata> {
	let client = match RpcClient::connect(rpc_url) {
		Ok(client) => client,
		Err(e) => {
			log::debug!("no relayer metadata: {e}");
			return None;
		},
	};
	match client.relayer_metadata().await {
		Ok(Value::Object(fields)) => Some(MockRelayerMetadata(fields)),
		Ok(other) => {
			log::debug!("no relayer metadata: unexpected payload {other}");
			None
		},
		Err(e) => {
			log::debug!("no relayer metadata: {e}");
			None
		},
	}
}

/// Source of development node metadata.
#[async_trait::async_trait]
pub trait MetadataProbe: Send + Sync {
	/// Probe `rpc_url` for relayer metadata, as [`try_probe`] does.
	///
	/// [`crate::InstanceFactory`] treats an error like missing metadata.
	async fn probe(&self, rpc_url: &Url) -> Result<Option<MockRelayerMetadata>, RpcClientError>;
}

/// A [`MetadataProbe`] querying the node over JSON-RPC.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRpcProbe;

#[async_trait::async_trait]
impl MetadataProbe for JsonRpcProbe {
	async fn probe(&self, rpc_url: &Url) -> Result<Option<MockRelayerMetadata>, RpcClientError> {
		try_probe(rpc_url).await
	}
}
