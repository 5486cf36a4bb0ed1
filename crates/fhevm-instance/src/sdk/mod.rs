// SPDX-License-Identifier: GPL-3.0

//! Relayer SDK acquisition.
//!
//! The relayer SDK is a vendor bundle that installs a single global object when its
//! script is loaded. This module models that global and the environment around it:
//!
//! - [`SdkGlobal`] / [`SdkHandle`] - the raw global and its validated form.
//! - [`SdkRegistry`] - where the global lives (one per page or process).
//! - [`ScriptHost`] - the document scripts are injected into.
//! - [`RelayerSdkLoader`] - idempotent script injection.
//! - [`init_sdk`] / [`is_initialized`] - idempotent one-time initialization.

mod global;
mod host;
mod init;
mod loader;
mod registry;

pub use global::{CreateInstance, InitSdk, NetworkConfig, SdkGlobal, SdkHandle, SdkShape};
pub use host::{HeadlessHost, ScriptElement, ScriptEvent, ScriptHost};
pub use init::{init_sdk, is_initialized};
pub use loader::RelayerSdkLoader;
pub use registry::{InMemorySdkRegistry, SdkRegistry, global_registry, valid_handle};

use crate::strings::sdk::SDK_CDN_URL;
use serde::{Deserialize, Serialize};
use url::Url;

/// Options forwarded verbatim to the SDK init entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
	/// Location of the TFHE WASM parameters, when not bundled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tfhe_params: Option<String>,
	/// Location of the KMS WASM parameters, when not bundled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kms_params: Option<String>,
	/// Number of worker threads the SDK may use.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thread: Option<u32>,
}

/// Configuration for loading and initializing the relayer SDK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkConfig {
	/// URL the SDK script is loaded from.
	pub script_url: Url,
	/// Options passed to the init entry point.
	pub init_options: Option<InitOptions>,
}

impl Default for SdkConfig {
	fn default() -> Self {
		Self {
			script_url: Url::parse(SDK_CDN_URL).expect("SDK CDN URL is valid"),
			init_options: None,
		}
	}
}
