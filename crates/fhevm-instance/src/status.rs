// SPDX-License-Identifier: GPL-3.0

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Progress milestones reported while an instance is being created.
#[derive(
	AsRefStr, Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CreationStatus {
	/// The SDK script is being loaded.
	SdkLoading,
	/// The SDK script has been loaded.
	SdkLoaded,
	/// The SDK is being initialized.
	SdkInitializing,
	/// The SDK has been initialized.
	SdkInitialized,
	/// The instance is being created by the SDK.
	Creating,
}

/// Trait for observing creation status updates.
pub trait Status {
	/// Update the observer with the provided `status`.
	fn update(&self, status: CreationStatus);
}

impl Status for () {
	// no-op: status updates are ignored
	fn update(&self, _: CreationStatus) {}
}
