// SPDX-License-Identifier: GPL-3.0

//! One-time relayer SDK initialization.

use crate::{
	InitOptions,
	error::InitError,
	sdk::{SdkRegistry, valid_handle},
};

/// Initialize the loaded SDK.
///
/// Idempotent: once the registry records a successful initialization, later calls
/// return `Ok(true)` without invoking the init entry point again.
///
/// # Arguments
/// * `registry` - Registry holding the SDK global. The SDK must already be loaded.
/// * `options` - Options forwarded to the init entry point.
pub async fn init_sdk(
	registry: &dyn SdkRegistry,
	options: Option<&InitOptions>,
) -> Result<bool, InitError> {
	let handle = valid_handle(registry).ok_or(InitError::NotLoaded)?;
	if registry.is_initialized() {
		log::trace!("relayer SDK already initialized");
		return Ok(true);
	}
	if !handle.init_sdk().init_sdk(options).await? {
		return Err(InitError::Rejected);
	}
	registry.mark_initialized();
	log::debug!("relayer SDK initialized");
	Ok(true)
}

/// Whether the SDK is loaded and has been initialized.
pub fn is_initialized(registry: &dyn SdkRegistry) -> bool {
	registry.is_initialized() && valid_handle(registry).is_some()
}
