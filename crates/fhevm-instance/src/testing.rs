// SPDX-License-Identifier: GPL-3.0

//! Fakes shared by the unit tests.

use crate::{
	ChainId, CreationStatus, Eip1193Provider, FhevmInstance, InitOptions, InstanceConfig,
	MockRelayerMetadata, Status,
	error::{RpcClientError, SdkCallError},
	instance::{EncryptedInput, EncryptedInputs, MockInstanceFactory, MockInstanceParams, UserDecryptRequest},
	probe::MetadataProbe,
	sdk::{CreateInstance, InitSdk, NetworkConfig, ScriptElement, ScriptEvent, ScriptHost, SdkGlobal, SdkRegistry},
	strings::rpc::methods,
};
use serde_json::{Value, json};
use std::{
	collections::BTreeMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A wallet provider answering `eth_chainId` with a fixed value.
pub(crate) struct FakeProvider {
	chain_id: Value,
	requests: AtomicUsize,
}

impl FakeProvider {
	pub(crate) fn new(chain_id: ChainId) -> Self {
		Self::raw(&format!("0x{chain_id:x}"))
	}

	pub(crate) fn raw(chain_id: &str) -> Self {
		Self { chain_id: json!(chain_id), requests: AtomicUsize::new(0) }
	}

	pub(crate) fn requests(&self) -> usize {
		self.requests.load(Ordering::SeqCst)
	}
}

#[async_trait::async_trait]
impl Eip1193Provider for FakeProvider {
	async fn request(&self, method: &str, _params: Vec<Value>) -> Result<Value, RpcClientError> {
		self.requests.fetch_add(1, Ordering::SeqCst);
		match method {
			methods::ETH_CHAIN_ID => Ok(self.chain_id.clone()),
			other => Err(RpcClientError::request_failed(other, "method not supported")),
		}
	}
}

/// How the fake SDK's init entry point completes.
#[derive(Clone, Debug)]
pub(crate) enum InitBehaviour {
	Succeed,
	Reject,
	Fail(String),
}

struct SdkState {
	init: Mutex<InitBehaviour>,
	create_failure: Mutex<Option<String>>,
	network_config: Mutex<Value>,
	init_calls: AtomicUsize,
	last_init_options: Mutex<Option<InitOptions>>,
	create_calls: AtomicUsize,
	last_config: Mutex<Option<InstanceConfig>>,
	cancel_on_init: Mutex<Option<CancellationToken>>,
	cancel_on_create: Mutex<Option<CancellationToken>>,
}

/// A fake relayer SDK recording how it is used.
#[derive(Clone)]
pub(crate) struct FakeSdk {
	state: Arc<SdkState>,
}

impl FakeSdk {
	pub(crate) const ACL_ADDRESS: &'static str = "0x687820221192C5B662b25367F70076A37bc79b6c";

	pub(crate) fn new() -> Self {
		let network_config = json!({
			"aclContractAddress": Self::ACL_ADDRESS,
			"kmsContractAddress": "0x1364cBBf2cDF5032C47d8226a6f6FBD2AFCDacAC",
			"inputVerifierContractAddress": "0xbc91f3daD1A5F19F8390c400196e58073B6a0BC4",
			"chainId": 11155111,
			"gatewayChainId": 55815,
			"relayerUrl": "https://relayer.testnet.zama.cloud",
		});
		Self {
			state: Arc::new(SdkState {
				init: Mutex::new(InitBehaviour::Succeed),
				create_failure: Mutex::default(),
				network_config: Mutex::new(network_config),
				init_calls: AtomicUsize::new(0),
				last_init_options: Mutex::default(),
				create_calls: AtomicUsize::new(0),
				last_config: Mutex::default(),
				cancel_on_init: Mutex::default(),
				cancel_on_create: Mutex::default(),
			}),
		}
	}

	pub(crate) fn with_init(self, behaviour: InitBehaviour) -> Self {
		*self.state.init.lock().unwrap() = behaviour;
		self
	}

	pub(crate) fn with_create_failure(self, message: &str) -> Self {
		*self.state.create_failure.lock().unwrap() = Some(message.to_string());
		self
	}

	pub(crate) fn with_network_config(self, config: Value) -> Self {
		*self.state.network_config.lock().unwrap() = config;
		self
	}

	/// Cancel `token` while initializing.
	pub(crate) fn cancelling_init(self, token: CancellationToken) -> Self {
		*self.state.cancel_on_init.lock().unwrap() = Some(token);
		self
	}

	/// Cancel `token` while creating an instance.
	pub(crate) fn cancelling_create(self, token: CancellationToken) -> Self {
		*self.state.cancel_on_create.lock().unwrap() = Some(token);
		self
	}

	/// The global the SDK script would install.
	pub(crate) fn global(&self) -> SdkGlobal {
		SdkGlobal {
			init_sdk: Some(self.state.clone() as Arc<dyn InitSdk>),
			create_instance: Some(self.creator()),
			network_config: Some(self.state.network_config.lock().unwrap().clone()),
		}
	}

	pub(crate) fn creator(&self) -> Arc<dyn CreateInstance> {
		self.state.clone()
	}

	pub(crate) fn network_config(&self) -> NetworkConfig {
		serde_json::from_value(self.state.network_config.lock().unwrap().clone()).unwrap_or_default()
	}

	pub(crate) fn init_calls(&self) -> usize {
		self.state.init_calls.load(Ordering::SeqCst)
	}

	pub(crate) fn last_init_options(&self) -> Option<InitOptions> {
		self.state.last_init_options.lock().unwrap().clone()
	}

	pub(crate) fn create_calls(&self) -> usize {
		self.state.create_calls.load(Ordering::SeqCst)
	}

	pub(crate) fn last_config(&self) -> Option<InstanceConfig> {
		self.state.last_config.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl InitSdk for SdkState {
	async fn init_sdk(&self, options: Option<&InitOptions>) -> Result<bool, SdkCallError> {
		self.init_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_init_options.lock().unwrap() = options.cloned();
		if let Some(token) = &*self.cancel_on_init.lock().unwrap() {
			token.cancel();
		}
		let behaviour = self.init.lock().unwrap().clone();
		match behaviour {
			InitBehaviour::Succeed => Ok(true),
			InitBehaviour::Reject => Ok(false),
			InitBehaviour::Fail(message) => Err(SdkCallError(message)),
		}
	}
}

#[async_trait::async_trait]
impl CreateInstance for SdkState {
	async fn create_instance(
		&self,
		config: InstanceConfig,
	) -> Result<Box<dyn FhevmInstance>, SdkCallError> {
		self.create_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_config.lock().unwrap() = Some(config);
		if let Some(token) = &*self.cancel_on_create.lock().unwrap() {
			token.cancel();
		}
		let failure = self.create_failure.lock().unwrap().clone();
		match failure {
			Some(message) => Err(SdkCallError(message)),
			None => Ok(Box::new(FakeInstance)),
		}
	}
}

/// An instance producing deterministic handles.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FakeInstance;

#[async_trait::async_trait]
impl FhevmInstance for FakeInstance {
	async fn encrypt(&self, input: EncryptedInput) -> Result<EncryptedInputs, SdkCallError> {
		let handles = (0..input.values().len()).map(|i| vec![i as u8; 32]).collect();
		Ok(EncryptedInputs { handles, input_proof: vec![0xaa; 4] })
	}

	async fn user_decrypt(
		&self,
		request: UserDecryptRequest,
	) -> Result<BTreeMap<String, Value>, SdkCallError> {
		Ok(request.handles.into_iter().map(|pair| (pair.handle, json!(0))).collect())
	}
}

/// A mock instance factory recording its parameters.
#[derive(Default)]
pub(crate) struct FakeMockFactory {
	calls: Mutex<Vec<MockInstanceParams>>,
	cancel: Option<CancellationToken>,
}

impl FakeMockFactory {
	/// Cancel `token` while building.
	pub(crate) fn cancelling(token: CancellationToken) -> Self {
		Self { cancel: Some(token), ..Default::default() }
	}

	pub(crate) fn calls(&self) -> Vec<MockInstanceParams> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl MockInstanceFactory for FakeMockFactory {
	async fn create_instance(
		&self,
		params: MockInstanceParams,
	) -> Result<Box<dyn FhevmInstance>, SdkCallError> {
		self.calls.lock().unwrap().push(params);
		if let Some(token) = &self.cancel {
			token.cancel();
		}
		Ok(Box::new(FakeInstance))
	}
}

/// A metadata probe with a canned answer.
pub(crate) struct FakeProbe {
	result: Result<Option<MockRelayerMetadata>, String>,
	cancel: Option<CancellationToken>,
	urls: Mutex<Vec<Url>>,
}

impl FakeProbe {
	pub(crate) fn returning(metadata: Option<MockRelayerMetadata>) -> Self {
		Self { result: Ok(metadata), cancel: None, urls: Mutex::default() }
	}

	pub(crate) fn failing(message: &str) -> Self {
		Self { result: Err(message.to_string()), cancel: None, urls: Mutex::default() }
	}

	/// Cancel `token` while probing.
	pub(crate) fn cancelling(mut self, token: CancellationToken) -> Self {
		self.cancel = Some(token);
		self
	}

	pub(crate) fn urls(&self) -> Vec<Url> {
		self.urls.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl MetadataProbe for FakeProbe {
	async fn probe(&self, rpc_url: &Url) -> Result<Option<MockRelayerMetadata>, RpcClientError> {
		self.urls.lock().unwrap().push(rpc_url.clone());
		if let Some(token) = &self.cancel {
			token.cancel();
		}
		self.result
			.clone()
			.map_err(|message| RpcClientError::request_failed(methods::WEB3_CLIENT_VERSION, message))
	}
}

/// What happens when a script is appended to a [`FakeHost`].
#[derive(Clone, Debug)]
pub(crate) enum ScriptBehaviour {
	/// Install the global, then fire the load event.
	Install(SdkGlobal),
	/// Fire the load event without installing anything.
	LoadOnly,
	/// Fire the error event.
	Fail(String),
}

/// A document recording appended scripts.
pub(crate) struct FakeHost {
	registry: Arc<dyn SdkRegistry>,
	browser: bool,
	behaviour: ScriptBehaviour,
	cancel: Option<CancellationToken>,
	scripts: Mutex<Vec<ScriptElement>>,
}

impl FakeHost {
	pub(crate) fn browser(registry: Arc<dyn SdkRegistry>) -> Self {
		Self {
			registry,
			browser: true,
			behaviour: ScriptBehaviour::LoadOnly,
			cancel: None,
			scripts: Mutex::default(),
		}
	}

	pub(crate) fn headless(registry: Arc<dyn SdkRegistry>) -> Self {
		Self { browser: false, ..Self::browser(registry) }
	}

	pub(crate) fn on_append(mut self, behaviour: ScriptBehaviour) -> Self {
		self.behaviour = behaviour;
		self
	}

	/// Start with a script for `src` already in the document.
	pub(crate) fn with_script(self, src: Url) -> Self {
		self.scripts.lock().unwrap().push(ScriptElement::new(src));
		self
	}

	/// Cancel `token` once a script settles.
	pub(crate) fn cancelling(mut self, token: CancellationToken) -> Self {
		self.cancel = Some(token);
		self
	}

	pub(crate) fn scripts(&self) -> Vec<ScriptElement> {
		self.scripts.lock().unwrap().clone()
	}
}

impl ScriptHost for FakeHost {
	fn is_browser(&self) -> bool {
		self.browser
	}

	fn has_script(&self, src: &Url) -> bool {
		self.scripts.lock().unwrap().iter().any(|script| &script.src == src)
	}

	fn append_script(&self, script: ScriptElement) -> oneshot::Receiver<ScriptEvent> {
		self.scripts.lock().unwrap().push(script);
		let (tx, rx) = oneshot::channel();
		let event = match self.behaviour.clone() {
			ScriptBehaviour::Install(sdk) => {
				self.registry.set_handle(sdk);
				ScriptEvent::Load
			},
			ScriptBehaviour::LoadOnly => ScriptEvent::Load,
			ScriptBehaviour::Fail(message) => ScriptEvent::Error(message),
		};
		if let Some(token) = &self.cancel {
			token.cancel();
		}
		let _ = tx.send(event);
		rx
	}
}

/// A status observer recording every update.
#[derive(Default)]
pub(crate) struct RecordingStatus {
	updates: Mutex<Vec<CreationStatus>>,
}

impl RecordingStatus {
	pub(crate) fn updates(&self) -> Vec<CreationStatus> {
		self.updates.lock().unwrap().clone()
	}
}

impl Status for RecordingStatus {
	fn update(&self, status: CreationStatus) {
		self.updates.lock().unwrap().push(status);
	}
}
