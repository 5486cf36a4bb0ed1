// SPDX-License-Identifier: GPL-3.0

//! Acquisition of FHEVM instances.
//!
//! An FHEVM instance encrypts inputs for, and decrypts results of, contracts on a
//! fully homomorphic encryption enabled chain. Getting one means working out which
//! chain a wallet or RPC URL points at, deciding whether it is a local development
//! node, and otherwise loading and initializing the hosted relayer SDK.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        InstanceFactory                          │
//! │        (cancellation checkpoints, CreationStatus updates)       │
//! └─────────────────────────────────────────────────────────────────┘
//!          │                    │                        │
//!          ▼                    ▼                        ▼
//! ┌─────────────────┐  ┌─────────────────┐  ┌──────────────────────────┐
//! │ Chain resolver  │  │  Metadata probe │  │        Relayer SDK       │
//! │  (eth_chainId,  │  │ (client version,│  │ ┌────────┐  ┌──────────┐ │
//! │   mock chains)  │  │ relayer metadata)│ │ │ Loader │─▶│   Init   │ │
//! └─────────────────┘  └─────────────────┘  │ └────────┘  └──────────┘ │
//!          │                    │           └──────────────────────────┘
//!          ▼                    ▼                        │
//! ┌──────────────────────────────────────┐               ▼
//! │   RpcClient / Eip1193Provider        │       ScriptHost + SdkRegistry
//! └──────────────────────────────────────┘
//! ```

mod chain;
pub mod error;
mod factory;
mod instance;
pub mod probe;
mod provider;
mod rpc;
pub mod sdk;
mod status;
mod strings;
#[cfg(any(test, feature = "integration-tests"))]
pub mod test_env;
#[cfg(test)]
mod testing;

pub use chain::{ChainId, ChainResolution, MockChains, chain_id, resolve};
pub use error::Error;
pub use factory::{InstanceFactory, is_address};
pub use instance::{
	ClearValue, DecryptionSignature, EncryptedInput, EncryptedInputs, FhevmInstance,
	HandleContractPair, InstanceBuilder, InstanceConfig, MockBuilder, MockInstanceFactory,
	MockInstanceParams, RelayerBuilder, UserDecryptRequest,
};
pub use probe::{JsonRpcProbe, MetadataProbe, MockRelayerMetadata, is_dev_node};
pub use provider::{Eip1193Provider, HttpProvider, NetworkTarget};
pub use rpc::RpcClient;
pub use sdk::{
	HeadlessHost, InMemorySdkRegistry, InitOptions, NetworkConfig, RelayerSdkLoader, ScriptHost,
	SdkConfig, SdkGlobal, SdkRegistry, global_registry,
};
pub use status::{CreationStatus, Status};
pub use tokio_util::sync::CancellationToken;
