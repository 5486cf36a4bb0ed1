// SPDX-License-Identifier: GPL-3.0

//! String constants for the relayer SDK loader and initializer.

/// Location of the relayer SDK bundle on the vendor CDN.
pub const SDK_CDN_URL: &str = "https://cdn.zama.ai/relayer-sdk-js/0.2.0/relayer-sdk-js.umd.cjs";

/// MIME type of the injected script element.
pub const SCRIPT_TYPE: &str = "text/javascript";

/// Names of the members the relayer SDK global exposes.
pub mod members {
	/// Name of the global the SDK bundle installs.
	pub const GLOBAL: &str = "relayerSDK";
	/// One-time initialization entry point.
	pub const INIT_SDK: &str = "initSDK";
	/// Instance creation entry point.
	pub const CREATE_INSTANCE: &str = "createInstance";
	/// Network configuration object.
	pub const NETWORK_CONFIG: &str = "SepoliaConfig";
	/// Field of the network configuration holding the ACL contract address.
	pub const ACL_CONTRACT_ADDRESS: &str = "aclContractAddress";
}
