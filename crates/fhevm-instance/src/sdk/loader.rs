// SPDX-License-Identifier: GPL-3.0

//! Relayer SDK script loader.
//!
//! ```text
//!   load()
//!     │
//!     ├── no browser context ──────────────────────► Err(Environment)
//!     ├── valid global present ────────────────────► Ok
//!     ├── malformed global present ────────────────► Err(InvalidGlobal)
//!     ├── script already in document ──────────────► Ok (warns if the global is not valid yet)
//!     └── append script ─► load event ─► valid ────► Ok
//!                           │             invalid ──► Err(InvalidAfterLoad)
//!                           └─ error event ────────► Err(ScriptFailed)
//! ```

use crate::{
	error::LoaderError,
	sdk::{ScriptElement, ScriptEvent, ScriptHost, SdkRegistry, SdkShape},
};
use std::sync::Arc;
use url::Url;

/// Loads the relayer SDK script into a [`ScriptHost`].
///
/// At most one script element is appended per document: once it is there, later
/// calls short-circuit on its presence.
pub struct RelayerSdkLoader {
	host: Arc<dyn ScriptHost>,
	registry: Arc<dyn SdkRegistry>,
	script_url: Url,
}

impl RelayerSdkLoader {
	/// Create a loader injecting `script_url` into `host`, observing `registry`.
	pub fn new(host: Arc<dyn ScriptHost>, registry: Arc<dyn SdkRegistry>, script_url: Url) -> Self {
		Self { host, registry, script_url }
	}

	/// The URL the SDK script is loaded from.
	pub fn script_url(&self) -> &Url {
		&self.script_url
	}

	/// Whether a structurally valid SDK global is present.
	pub fn is_loaded(&self) -> Result<bool, LoaderError> {
		if !self.host.is_browser() {
			return Err(LoaderError::Environment);
		}
		Ok(matches!(self.shape(), Some(SdkShape::Valid(_))))
	}

	/// Make sure the SDK global is present, injecting the script if needed.
	pub async fn load(&self) -> Result<(), LoaderError> {
		if !self.host.is_browser() {
			return Err(LoaderError::Environment);
		}
		match self.shape() {
			Some(SdkShape::Valid(_)) => return Ok(()),
			Some(SdkShape::Invalid(reason)) => return Err(LoaderError::InvalidGlobal { reason }),
			None => {},
		}

		if self.host.has_script(&self.script_url) {
			// The earlier script may still be loading, or may have failed; its events are not
			// awaited here. A missing global surfaces when the SDK is initialized.
			if !matches!(self.shape(), Some(SdkShape::Valid(_))) {
				log::warn!(
					"RelayerSDKLoader: a script for {} is already in the document but the SDK global is not valid yet",
					self.script_url
				);
			}
			return Ok(());
		}

		log::debug!("RelayerSDKLoader: loading {}", self.script_url);
		let events = self.host.append_script(ScriptElement::new(self.script_url.clone()));
		match events.await {
			Ok(ScriptEvent::Load) => match self.shape() {
				Some(SdkShape::Valid(_)) => {
					log::debug!("RelayerSDKLoader: loaded {}", self.script_url);
					Ok(())
				},
				Some(SdkShape::Invalid(reason)) => Err(LoaderError::InvalidAfterLoad {
					url: self.script_url.to_string(),
					reason,
				}),
				None => Err(LoaderError::InvalidAfterLoad {
					url: self.script_url.to_string(),
					reason: "no SDK global was installed".to_string(),
				}),
			},
			Ok(ScriptEvent::Error(message)) =>
				Err(LoaderError::ScriptFailed { url: self.script_url.to_string(), message }),
			Err(_) => Err(LoaderError::ScriptFailed {
				url: self.script_url.to_string(),
				message: "script element was discarded before it settled".to_string(),
			}),
		}
	}

	fn shape(&self) -> Option<SdkShape> {
		self.registry.handle().map(|sdk| sdk.validate())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		InMemorySdkRegistry, SdkGlobal,
		testing::{FakeHost, FakeSdk, ScriptBehaviour},
	};

	fn script_url() -> Url {
		"https://cdn.example.com/relayer-sdk.js".parse().unwrap()
	}

	fn loader(host: &Arc<FakeHost>, registry: &Arc<InMemorySdkRegistry>) -> RelayerSdkLoader {
		RelayerSdkLoader::new(host.clone(), registry.clone(), script_url())
	}

	#[test]
	fn is_loaded_fails_outside_browser() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(FakeHost::headless(registry.clone()));
		assert!(matches!(loader(&host, &registry).is_loaded(), Err(LoaderError::Environment)));
	}

	#[test]
	fn is_loaded_requires_every_member() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(FakeHost::browser(registry.clone()));
		let loader = loader(&host, &registry);
		let sdk = FakeSdk::new();
		assert!(!loader.is_loaded().unwrap());

		for partial in [
			SdkGlobal { init_sdk: None, ..sdk.global() },
			SdkGlobal { create_instance: None, ..sdk.global() },
			SdkGlobal { network_config: None, ..sdk.global() },
		] {
			registry.set_handle(partial);
			assert!(!loader.is_loaded().unwrap());
		}

		registry.set_handle(sdk.global());
		assert!(loader.is_loaded().unwrap());
	}

	#[tokio::test]
	async fn load_fails_outside_browser() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(FakeHost::headless(registry.clone()));
		assert!(matches!(loader(&host, &registry).load().await, Err(LoaderError::Environment)));
		assert!(host.scripts().is_empty());
	}

	#[tokio::test]
	async fn load_injects_one_async_script() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let sdk = FakeSdk::new();
		let host = Arc::new(
			FakeHost::browser(registry.clone()).on_append(ScriptBehaviour::Install(sdk.global())),
		);
		let loader = loader(&host, &registry);

		loader.load().await.unwrap();
		assert!(loader.is_loaded().unwrap());
		assert_eq!(host.scripts(), vec![ScriptElement::new(script_url())]);
	}

	#[tokio::test]
	async fn load_twice_with_valid_global_injects_nothing() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		registry.set_handle(FakeSdk::new().global());
		let host = Arc::new(FakeHost::browser(registry.clone()));
		let loader = loader(&host, &registry);

		loader.load().await.unwrap();
		loader.load().await.unwrap();
		assert!(host.scripts().is_empty());
	}

	#[tokio::test]
	async fn load_after_successful_load_injects_nothing_more() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(
			FakeHost::browser(registry.clone())
				.on_append(ScriptBehaviour::Install(FakeSdk::new().global())),
		);
		let loader = loader(&host, &registry);

		loader.load().await.unwrap();
		loader.load().await.unwrap();
		assert_eq!(host.scripts().len(), 1);
	}

	#[tokio::test]
	async fn malformed_global_fails_without_injecting() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		registry.set_handle(SdkGlobal::default());
		let host = Arc::new(FakeHost::browser(registry.clone()));

		let err = loader(&host, &registry).load().await.unwrap_err();
		assert!(matches!(err, LoaderError::InvalidGlobal { .. }), "{err:?}");
		assert!(host.scripts().is_empty());
	}

	#[tokio::test]
	async fn existing_script_resolves_without_waiting() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(FakeHost::browser(registry.clone()).with_script(script_url()));
		let loader = loader(&host, &registry);

		loader.load().await.unwrap();
		assert!(!loader.is_loaded().unwrap());
		assert_eq!(host.scripts().len(), 1);
	}

	#[tokio::test]
	async fn script_error_event_fails_load() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(
			FakeHost::browser(registry.clone()).on_append(ScriptBehaviour::Fail("404".into())),
		);
		let err = loader(&host, &registry).load().await.unwrap_err();
		assert!(
			matches!(&err, LoaderError::ScriptFailed { message, .. } if message == "404"),
			"{err:?}"
		);
	}

	#[tokio::test]
	async fn invalid_global_after_load_fails_load() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let sdk = FakeSdk::new();
		let partial = SdkGlobal { create_instance: None, ..sdk.global() };
		let host =
			Arc::new(FakeHost::browser(registry.clone()).on_append(ScriptBehaviour::Install(partial)));
		let err = loader(&host, &registry).load().await.unwrap_err();
		assert!(matches!(err, LoaderError::InvalidAfterLoad { .. }), "{err:?}");
	}

	#[tokio::test]
	async fn load_event_without_global_fails_load() {
		let registry = Arc::new(InMemorySdkRegistry::new());
		let host = Arc::new(FakeHost::browser(registry.clone()).on_append(ScriptBehaviour::LoadOnly));
		let err = loader(&host, &registry).load().await.unwrap_err();
		assert!(
			matches!(&err, LoaderError::InvalidAfterLoad { reason, .. } if reason == "no SDK global was installed"),
			"{err:?}"
		);
	}
}
