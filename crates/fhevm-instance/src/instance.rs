// SPDX-License-Identifier: GPL-3.0

//! FHEVM instances and the builders producing them.
//!
//! An instance is created either by a mock factory for local development nodes
//! ([`MockBuilder`]) or by the relayer SDK for real networks ([`RelayerBuilder`]).
//! Both are [`InstanceBuilder`]s, so the orchestrator treats them alike.

use crate::{
	ChainId, MockRelayerMetadata, NetworkConfig, NetworkTarget,
	error::SdkCallError,
	sdk::CreateInstance,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, sync::Arc};
use url::Url;

/// A clear value to be encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearValue {
	/// An encrypted boolean.
	Bool(bool),
	/// An encrypted 8-bit unsigned integer.
	U8(u8),
	/// An encrypted 16-bit unsigned integer.
	U16(u16),
	/// An encrypted 32-bit unsigned integer.
	U32(u32),
	/// An encrypted 64-bit unsigned integer.
	U64(u64),
	/// An encrypted address.
	Address(String),
}

/// Encrypted inputs bound to a contract and a user, ready to be encrypted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedInput {
	contract_address: String,
	user_address: String,
	values: Vec<ClearValue>,
}

impl EncryptedInput {
	/// Start an empty input for `contract_address` on behalf of `user_address`.
	pub fn new(contract_address: impl Into<String>, user_address: impl Into<String>) -> Self {
		Self {
			contract_address: contract_address.into(),
			user_address: user_address.into(),
			values: Vec::new(),
		}
	}

	/// Append a boolean.
	pub fn add_bool(&mut self, value: bool) -> &mut Self {
		self.push(ClearValue::Bool(value))
	}

	/// Append an 8-bit unsigned integer.
	pub fn add8(&mut self, value: u8) -> &mut Self {
		self.push(ClearValue::U8(value))
	}

	/// Append a 16-bit unsigned integer.
	pub fn add16(&mut self, value: u16) -> &mut Self {
		self.push(ClearValue::U16(value))
	}

	/// Append a 32-bit unsigned integer.
	pub fn add32(&mut self, value: u32) -> &mut Self {
		self.push(ClearValue::U32(value))
	}

	/// Append a 64-bit unsigned integer.
	pub fn add64(&mut self, value: u64) -> &mut Self {
		self.push(ClearValue::U64(value))
	}

	/// Append an address.
	pub fn add_address(&mut self, value: impl Into<String>) -> &mut Self {
		self.push(ClearValue::Address(value.into()))
	}

	/// The contract the input is bound to.
	pub fn contract_address(&self) -> &str {
		&self.contract_address
	}

	/// The user the input is bound to.
	pub fn user_address(&self) -> &str {
		&self.user_address
	}

	/// The values, in insertion order.
	pub fn values(&self) -> &[ClearValue] {
		&self.values
	}

	fn push(&mut self, value: ClearValue) -> &mut Self {
		self.values.push(value);
		self
	}
}

/// Ciphertext handles plus the proof that they were encrypted correctly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedInputs {
	/// One handle per encrypted value, in insertion order.
	pub handles: Vec<Vec<u8>>,
	/// Proof of correct encryption.
	pub input_proof: Vec<u8>,
}

/// A ciphertext handle and the contract it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleContractPair {
	/// The ciphertext handle, hex encoded.
	pub handle: String,
	/// The contract allowed to use the handle.
	pub contract_address: String,
}

/// Signed authorization to decrypt, produced by the decryption signature helper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionSignature {
	/// Private key of the ephemeral keypair.
	pub private_key: String,
	/// Public key of the ephemeral keypair.
	pub public_key: String,
	/// EIP-712 signature over the request.
	pub signature: String,
	/// Contracts the signature is valid for.
	pub contract_addresses: Vec<String>,
	/// The signing user.
	pub user_address: String,
	/// Start of validity, in seconds since the Unix epoch.
	pub start_timestamp: u64,
	/// Validity period in days.
	pub duration_days: u32,
}

/// A request to decrypt handles on behalf of a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDecryptRequest {
	/// The handles to decrypt.
	pub handles: Vec<HandleContractPair>,
	/// The user's authorization.
	pub signature: DecryptionSignature,
}

/// Capability object for encrypting inputs and decrypting results.
#[async_trait::async_trait]
pub trait FhevmInstance: Send + Sync {
	/// Start building encrypted inputs for `contract_address` on behalf of `user_address`.
	fn create_encrypted_input(&self, contract_address: &str, user_address: &str) -> EncryptedInput {
		EncryptedInput::new(contract_address, user_address)
	}

	/// Encrypt `input`.
	async fn encrypt(&self, input: EncryptedInput) -> Result<EncryptedInputs, SdkCallError>;

	/// Decrypt the requested handles, keyed by handle.
	async fn user_decrypt(
		&self,
		request: UserDecryptRequest,
	) -> Result<BTreeMap<String, Value>, SdkCallError>;
}

impl fmt::Debug for dyn FhevmInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("FhevmInstance")
	}
}

/// Configuration handed to the SDK's instance creation entry point: the SDK's network
/// configuration with the caller's network transport attached.
#[derive(Clone, Debug)]
pub struct InstanceConfig {
	/// The SDK's network configuration.
	pub network_config: NetworkConfig,
	/// The provider or RPC URL the instance talks to.
	pub network: NetworkTarget,
}

/// Parameters for building an instance against a development node.
#[derive(Clone, Debug, PartialEq)]
pub struct MockInstanceParams {
	/// RPC URL of the development node.
	pub rpc_url: Url,
	/// Chain id of the development node.
	pub chain_id: ChainId,
	/// Relayer metadata served by the node.
	pub metadata: MockRelayerMetadata,
}

/// Builds instances backed by a local development node instead of the hosted relayer.
#[async_trait::async_trait]
pub trait MockInstanceFactory: Send + Sync {
	/// Create an instance for the development node described by `params`.
	async fn create_instance(
		&self,
		params: MockInstanceParams,
	) -> Result<Box<dyn FhevmInstance>, SdkCallError>;
}

/// Something that can produce an [`FhevmInstance`].
#[async_trait::async_trait]
pub trait InstanceBuilder: Send + Sync {
	/// Build the instance.
	async fn build(&self) -> Result<Box<dyn FhevmInstance>, SdkCallError>;
}

/// Builds an instance for a development node through a [`MockInstanceFactory`].
pub struct MockBuilder {
	factory: Arc<dyn MockInstanceFactory>,
	params: MockInstanceParams,
}

impl MockBuilder {
	/// A builder creating an instance from `params` with `factory`.
	pub fn new(factory: Arc<dyn MockInstanceFactory>, params: MockInstanceParams) -> Self {
		Self { factory, params }
	}
}

#[async_trait::async_trait]
impl InstanceBuilder for MockBuilder {
	async fn build(&self) -> Result<Box<dyn FhevmInstance>, SdkCallError> {
		self.factory.create_instance(self.params.clone()).await
	}
}

/// Builds an instance through the relayer SDK's creation entry point.
pub struct RelayerBuilder {
	create_instance: Arc<dyn CreateInstance>,
	config: InstanceConfig,
}

impl RelayerBuilder {
	/// A builder creating an instance from `config` with the SDK's `create_instance`.
	pub fn new(create_instance: Arc<dyn CreateInstance>, config: InstanceConfig) -> Self {
		Self { create_instance, config }
	}
}

#[async_trait::async_trait]
impl InstanceBuilder for RelayerBuilder {
	async fn build(&self) -> Result<Box<dyn FhevmInstance>, SdkCallError> {
		self.create_instance.create_instance(self.config.clone()).await
	}
}
