// SPDX-License-Identifier: GPL-3.0

//! Instance creation orchestration.
//!
//! ```text
//!   create_instance()
//!     │
//!     ├── resolve chain
//!     ├── mock chain? ─► probe metadata ─► present ─► "creating" ─► MockBuilder ──► instance
//!     │                                   absent or probe failed ──┐
//!     ├── SDK global not valid? ─► "sdk-loading" ─► load ─► "sdk-loaded"
//!     ├── not initialized? ─► "sdk-initializing" ─► init ─► "sdk-initialized"
//!     ├── validate ACL address
//!     └── "creating" ─► RelayerBuilder ─────────────────────────────────────► instance
//! ```
//!
//! The mock fast path is only taken when the probe succeeds; a node that cannot be
//! probed is treated like one without metadata. The cancellation token is checked
//! before and after every suspension point.

use crate::{
	ChainResolution, CreationStatus, FhevmInstance, InitOptions, InstanceConfig, MockChains,
	NetworkTarget, SdkConfig, Status,
	error::{Error, InitError},
	instance::{InstanceBuilder, MockBuilder, MockInstanceFactory, MockInstanceParams, RelayerBuilder},
	probe::{JsonRpcProbe, MetadataProbe},
	resolve,
	sdk::{NetworkConfig, RelayerSdkLoader, ScriptHost, SdkRegistry, init_sdk, is_initialized, valid_handle},
	strings::sdk::members,
};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Creates [`FhevmInstance`]s, loading and initializing the relayer SDK on demand.
pub struct InstanceFactory {
	registry: Arc<dyn SdkRegistry>,
	loader: RelayerSdkLoader,
	init_options: Option<InitOptions>,
	mock_factory: Option<Arc<dyn MockInstanceFactory>>,
	probe: Arc<dyn MetadataProbe>,
}

impl InstanceFactory {
	/// A factory loading the SDK from its default location into `host`.
	pub fn new(host: Arc<dyn ScriptHost>, registry: Arc<dyn SdkRegistry>) -> Self {
		Self::with_config(host, registry, SdkConfig::default())
	}

	/// A factory loading the SDK into `host` as described by `config`.
	pub fn with_config(
		host: Arc<dyn ScriptHost>,
		registry: Arc<dyn SdkRegistry>,
		config: SdkConfig,
	) -> Self {
		let loader = RelayerSdkLoader::new(host, registry.clone(), config.script_url);
		Self {
			registry,
			loader,
			init_options: config.init_options,
			mock_factory: None,
			probe: Arc::new(JsonRpcProbe),
		}
	}

	/// Build instances for development nodes with `factory`.
	///
	/// Without a mock factory, development nodes go through the relayer SDK like any
	/// other network.
	pub fn with_mock_factory(mut self, factory: Arc<dyn MockInstanceFactory>) -> Self {
		self.mock_factory = Some(factory);
		self
	}

	/// Replace the development node metadata probe.
	pub fn with_probe(mut self, probe: Arc<dyn MetadataProbe>) -> Self {
		self.probe = probe;
		self
	}

	/// Create an instance for `target`.
	///
	/// # Arguments
	/// * `target` - The provider or RPC URL the instance talks to.
	/// * `mock_chains` - Mock chain mappings merged over [`MockChains::defaults`].
	/// * `cancel` - Checked at every suspension point; once cancelled, [`Error::Cancelled`]
	///   is returned and no further progress is made.
	/// * `status` - Observer for progress updates. Pass `&()` to ignore them.
	pub async fn create_instance(
		&self,
		target: &NetworkTarget,
		mock_chains: Option<&MockChains>,
		cancel: &CancellationToken,
		status: &impl Status,
	) -> Result<Box<dyn FhevmInstance>, Error> {
		checkpoint(cancel)?;
		let resolution = resolve(target, mock_chains).await?;
		checkpoint(cancel)?;

		if let ChainResolution::Mock { chain_id, rpc_url } = resolution {
			let metadata = self.probe.probe(&rpc_url).await.unwrap_or_else(|e| {
				log::debug!("unable to probe {rpc_url} for relayer metadata: {e}");
				None
			});
			checkpoint(cancel)?;
			match (metadata, &self.mock_factory) {
				(Some(metadata), Some(factory)) => {
					report(status, CreationStatus::Creating);
					let params = MockInstanceParams { rpc_url, chain_id, metadata };
					let instance =
						MockBuilder::new(factory.clone(), params).build().await.map_err(Error::Creation)?;
					checkpoint(cancel)?;
					return Ok(instance);
				},
				(Some(_), None) => log::warn!(
					"{rpc_url} is a development node but no mock instance factory is configured, using the relayer SDK"
				),
				(None, _) => log::debug!("no relayer metadata at {rpc_url}, using the relayer SDK"),
			}
		}
		checkpoint(cancel)?;

		if !self.loader.is_loaded()? {
			report(status, CreationStatus::SdkLoading);
			self.loader.load().await?;
			checkpoint(cancel)?;
			report(status, CreationStatus::SdkLoaded);
		}

		if !is_initialized(self.registry.as_ref()) {
			report(status, CreationStatus::SdkInitializing);
			init_sdk(self.registry.as_ref(), self.init_options.as_ref()).await?;
			checkpoint(cancel)?;
			report(status, CreationStatus::SdkInitialized);
		}

		let handle = valid_handle(self.registry.as_ref()).ok_or(InitError::NotLoaded)?;
		validate_network_config(handle.network_config())?;

		report(status, CreationStatus::Creating);
		let config =
			InstanceConfig { network_config: handle.network_config().clone(), network: target.clone() };
		let instance = RelayerBuilder::new(handle.create_instance().clone(), config)
			.build()
			.await
			.map_err(Error::Creation)?;
		checkpoint(cancel)?;
		Ok(instance)
	}
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), Error> {
	if cancel.is_cancelled() {
		log::debug!("instance creation cancelled");
		return Err(Error::Cancelled);
	}
	Ok(())
}

fn report(status: &impl Status, update: CreationStatus) {
	log::debug!("instance creation: {update}");
	status.update(update);
}

fn validate_network_config(config: &NetworkConfig) -> Result<(), Error> {
	match config.acl_contract_address() {
		Some(Value::String(address)) if is_address(address) => Ok(()),
		Some(Value::String(address)) => Err(Error::InvalidConfig {
			reason: format!("`{}` is not an address: {address}", members::ACL_CONTRACT_ADDRESS),
		}),
		Some(other) => Err(Error::InvalidConfig {
			reason: format!("`{}` is not a string: {other}", members::ACL_CONTRACT_ADDRESS),
		}),
		None =>
			Err(Error::InvalidConfig { reason: format!("missing `{}`", members::ACL_CONTRACT_ADDRESS) }),
	}
}

/// Whether `value` is a `0x`-prefixed 20-byte hex address. Checksums are not verified.
pub fn is_address(value: &str) -> bool {
	value
		.strip_prefix("0x")
		.is_some_and(|digits| digits.len() == 40 && hex::decode(digits).is_ok())
}
