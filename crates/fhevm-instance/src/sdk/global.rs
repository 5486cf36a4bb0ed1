// SPDX-License-Identifier: GPL-3.0

//! The relayer SDK global and its structural validation.

use crate::{
	FhevmInstance, InitOptions, InstanceConfig,
	error::SdkCallError,
	strings::sdk::members,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// The SDK's asynchronous one-time initialization entry point.
#[async_trait::async_trait]
pub trait InitSdk: Send + Sync {
	/// Initialize the SDK, returning whether initialization succeeded.
	async fn init_sdk(&self, options: Option<&InitOptions>) -> Result<bool, SdkCallError>;
}

/// The SDK's instance creation entry point.
#[async_trait::async_trait]
pub trait CreateInstance: Send + Sync {
	/// Create an instance for the given configuration.
	async fn create_instance(
		&self,
		config: InstanceConfig,
	) -> Result<Box<dyn FhevmInstance>, SdkCallError>;
}

/// The raw global installed by the SDK script.
///
/// Every member is optional: nothing guarantees that what ended up in the global
/// slot is actually the SDK. Use [`SdkGlobal::validate`] before relying on it.
#[derive(Clone, Default)]
pub struct SdkGlobal {
	/// The init entry point.
	pub init_sdk: Option<Arc<dyn InitSdk>>,
	/// The instance creation entry point.
	pub create_instance: Option<Arc<dyn CreateInstance>>,
	/// The network configuration object.
	pub network_config: Option<Value>,
}

impl fmt::Debug for SdkGlobal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct(members::GLOBAL)
			.field(members::INIT_SDK, &self.init_sdk.is_some())
			.field(members::CREATE_INSTANCE, &self.create_instance.is_some())
			.field(members::NETWORK_CONFIG, &self.network_config)
			.finish()
	}
}

/// Result of validating an [`SdkGlobal`].
#[derive(Debug)]
pub enum SdkShape {
	/// All members are present with the expected shapes.
	Valid(SdkHandle),
	/// At least one member is missing or malformed.
	Invalid(String),
}

impl SdkGlobal {
	/// Check that every required member is present with the expected shape.
	pub fn validate(&self) -> SdkShape {
		let Some(init_sdk) = self.init_sdk.clone() else {
			return SdkShape::Invalid(format!("`{}` is not a function", members::INIT_SDK));
		};
		let Some(create_instance) = self.create_instance.clone() else {
			return SdkShape::Invalid(format!("`{}` is not a function", members::CREATE_INSTANCE));
		};
		let Some(Value::Object(config)) = &self.network_config else {
			return SdkShape::Invalid(format!("`{}` is not an object", members::NETWORK_CONFIG));
		};
		SdkShape::Valid(SdkHandle {
			init_sdk,
			create_instance,
			network_config: NetworkConfig(config.clone()),
		})
	}

	/// Whether [`SdkGlobal::validate`] succeeds.
	pub fn is_valid(&self) -> bool {
		matches!(self.validate(), SdkShape::Valid(_))
	}
}

/// A structurally valid SDK global.
#[derive(Clone)]
pub struct SdkHandle {
	init_sdk: Arc<dyn InitSdk>,
	create_instance: Arc<dyn CreateInstance>,
	network_config: NetworkConfig,
}

impl SdkHandle {
	/// The init entry point.
	pub fn init_sdk(&self) -> &Arc<dyn InitSdk> {
		&self.init_sdk
	}

	/// The instance creation entry point.
	pub fn create_instance(&self) -> &Arc<dyn CreateInstance> {
		&self.create_instance
	}

	/// The network configuration object.
	pub fn network_config(&self) -> &NetworkConfig {
		&self.network_config
	}
}

impl fmt::Debug for SdkHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SdkHandle").field("network_config", &self.network_config).finish()
	}
}

/// Network configuration published by the SDK (contract addresses, relayer URL, chain ids).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkConfig(Map<String, Value>);

impl NetworkConfig {
	/// Wrap a configuration object.
	pub fn new(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	/// The raw ACL contract address field.
	pub fn acl_contract_address(&self) -> Option<&Value> {
		self.0.get(members::ACL_CONTRACT_ADDRESS)
	}

	/// Look up a field by name.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// All fields.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}
}
