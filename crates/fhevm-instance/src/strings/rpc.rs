// SPDX-License-Identifier: GPL-3.0

//! String constants for the JSON-RPC client and chain resolution.

/// JSON-RPC method names used for requests and error reporting.
pub mod methods {
	/// Standard Ethereum chain id query.
	pub const ETH_CHAIN_ID: &str = "eth_chainId";
	/// Client (node implementation) version query.
	pub const WEB3_CLIENT_VERSION: &str = "web3_clientVersion";
	/// Relayer bootstrap metadata, only served by FHEVM development nodes.
	pub const FHEVM_RELAYER_METADATA: &str = "fhevm_relayer_metadata";
}

/// Well-known local development networks.
pub mod dev_node {
	/// Chain id used by Hardhat and Anvil development nodes.
	pub const CHAIN_ID: u32 = 31337;
	/// Loopback RPC URL of a development node started with default settings.
	pub const RPC_URL: &str = "http://localhost:8545";
	/// Marker looked up (case-insensitively) in the client version of a development node.
	pub const CLIENT_VERSION_MARKER: &str = "hardhat";
}
