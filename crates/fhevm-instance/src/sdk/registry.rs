// SPDX-License-Identifier: GPL-3.0

//! Ownership of the SDK global.

use crate::sdk::{SdkGlobal, SdkHandle, SdkShape};
use once_cell::sync::Lazy;
use std::sync::{
	Arc, Mutex, PoisonError,
	atomic::{AtomicBool, Ordering},
};

/// Where the SDK global lives.
///
/// Production code shares [`global_registry`]; tests create an
/// [`InMemorySdkRegistry`] each so that they do not observe one another.
pub trait SdkRegistry: Send + Sync {
	/// The current global, if any has been installed.
	fn handle(&self) -> Option<SdkGlobal>;
	/// Install (or replace) the global.
	fn set_handle(&self, sdk: SdkGlobal);
	/// Whether the SDK has been initialized.
	fn is_initialized(&self) -> bool;
	/// Record a successful initialization. There is no way back.
	fn mark_initialized(&self);
}

/// A [`SdkRegistry`] held in memory.
#[derive(Debug, Default)]
pub struct InMemorySdkRegistry {
	sdk: Mutex<Option<SdkGlobal>>,
	initialized: AtomicBool,
}

impl InMemorySdkRegistry {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}
}

impl SdkRegistry for InMemorySdkRegistry {
	fn handle(&self) -> Option<SdkGlobal> {
		self.sdk.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	fn set_handle(&self, sdk: SdkGlobal) {
		*self.sdk.lock().unwrap_or_else(PoisonError::into_inner) = Some(sdk);
	}

	fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Acquire)
	}

	fn mark_initialized(&self) {
		self.initialized.store(true, Ordering::Release);
	}
}

static GLOBAL_REGISTRY: Lazy<Arc<InMemorySdkRegistry>> =
	Lazy::new(|| Arc::new(InMemorySdkRegistry::new()));

/// The process-wide registry.
pub fn global_registry() -> Arc<InMemorySdkRegistry> {
	GLOBAL_REGISTRY.clone()
}

/// The installed global, if it is structurally valid.
pub fn valid_handle(registry: &dyn SdkRegistry) -> Option<SdkHandle> {
	match registry.handle()?.validate() {
		SdkShape::Valid(handle) => Some(handle),
		SdkShape::Invalid(reason) => {
			log::trace!("SDK global is invalid: {reason}");
			None
		},
	}
}
