// SPDX-License-Identifier: GPL-3.0

//! In-process JSON-RPC nodes for tests.
//!
//! Shared by the unit tests of this crate, its integration tests and dependent crates
//! through the `integration-tests` feature.

use crate::{ChainId, MockRelayerMetadata, strings::rpc::methods};
use jsonrpsee::{
	RpcModule,
	server::{ServerBuilder, ServerHandle},
	types::ErrorObjectOwned,
};
use serde_json::{Value, json};
use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};
use url::Url;

const METHOD_NOT_FOUND: i32 = -32601;

/// Address of the ACL contract in [`dev_metadata`].
pub const DEV_ACL_ADDRESS: &str = "0x50157CFfD6bBFA2DECe204a89ec419c23ef5755D";

/// Relayer metadata served by [`TestNode::hardhat`].
pub fn dev_metadata() -> MockRelayerMetadata {
	let Value::Object(fields) = json!({
		"ACLAddress": DEV_ACL_ADDRESS,
		"InputVerifierAddress": "0x901F8942346f7AB3a01F6D7613119Bca447Bb030",
		"KMSVerifierAddress": "0x1364cBBf2cDF5032C47d8226a6f6FBD2AFCDacAC",
	}) else {
		unreachable!()
	};
	MockRelayerMetadata::new(fields)
}

/// A loopback URL nothing listens on.
pub fn unreachable_url() -> Url {
	"http://127.0.0.1:19999".parse().expect("URL should parse")
}

/// Configuration of an in-process JSON-RPC node.
///
/// The node answers `eth_chainId`, `web3_clientVersion` and `fhevm_relayer_metadata`.
/// Without metadata the last one fails with "method not found".
#[derive(Clone, Debug)]
pub struct TestNode {
	chain_id: ChainId,
	client_version: Value,
	metadata: Option<Value>,
}

impl TestNode {
	/// A development node on chain 31337 serving [`dev_metadata`].
	pub fn hardhat() -> Self {
		Self {
			chain_id: 31337,
			client_version: json!("HardhatNetwork/2.22.19/@nomicfoundation/edr/0.8.0"),
			metadata: Some(Value::Object(dev_metadata().as_map().clone())),
		}
	}

	/// A regular Sepolia node.
	pub fn sepolia() -> Self {
		Self {
			chain_id: 11155111,
			client_version: json!("Geth/v1.14.12-stable/linux-amd64/go1.23.4"),
			metadata: None,
		}
	}

	pub fn chain_id(mut self, chain_id: ChainId) -> Self {
		self.chain_id = chain_id;
		self
	}

	pub fn client_version(self, version: &str) -> Self {
		self.client_version_value(json!(version))
	}

	pub fn client_version_value(mut self, version: Value) -> Self {
		self.client_version = version;
		self
	}

	pub fn metadata(mut self, metadata: Value) -> Self {
		self.metadata = Some(metadata);
		self
	}

	pub fn without_metadata(mut self) -> Self {
		self.metadata = None;
		self
	}

	/// Start serving on a free loopback port.
	pub async fn spawn(self) -> RunningNode {
		let server =
			ServerBuilder::default().build("127.0.0.1:0").await.expect("server should bind");
		let addr = server.local_addr().expect("local addr should be available");
		let state = Arc::new(NodeState { node: self, calls: Mutex::default() });

		let mut module = RpcModule::new(state.clone());
		for method in
			[methods::ETH_CHAIN_ID, methods::WEB3_CLIENT_VERSION, methods::FHEVM_RELAYER_METADATA]
		{
			module
				.register_method(method, move |_, state, _| state.respond(method))
				.expect("method should register");
		}

		let handle = server.start(module);
		let url = format!("http://{addr}").parse().expect("server URL should parse");
		RunningNode { url, handle, state }
	}
}

struct NodeState {
	node: TestNode,
	calls: Mutex<HashMap<&'static str, usize>>,
}

impl NodeState {
	fn respond(&self, method: &'static str) -> Result<Value, ErrorObjectOwned> {
		*self.calls.lock().expect("lock should not be poisoned").entry(method).or_default() += 1;
		match method {
			methods::ETH_CHAIN_ID => Ok(json!(format!("0x{:x}", self.node.chain_id))),
			methods::WEB3_CLIENT_VERSION => Ok(self.node.client_version.clone()),
			_ => self.node.metadata.clone().ok_or_else(|| {
				ErrorObjectOwned::owned(
					METHOD_NOT_FOUND,
					format!("the method {method} does not exist/is not available"),
					None::<()>,
				)
			}),
		}
	}
}

/// A node started by [`TestNode::spawn`]. Stops when dropped.
pub struct RunningNode {
	url: Url,
	handle: ServerHandle,
	state: Arc<NodeState>,
}

impl RunningNode {
	pub fn url(&self) -> Url {
		self.url.clone()
	}

	/// How many times `method` has been called.
	pub fn calls(&self, method: &str) -> usize {
		self.state
			.calls
			.lock()
			.expect("lock should not be poisoned")
			.get(method)
			.copied()
			.unwrap_or_default()
	}
}

impl Drop for RunningNode {
	fn drop(&mut self) {
		let _ = self.handle.stop();
	}
}
