// SPDX-License-Identifier: GPL-3.0

//! Relayer SDK loader and initializer error types.

use thiserror::Error;

/// An error raised by an SDK capability (init, instance creation, mock instance factory).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SdkCallError(pub String);

impl From<&str> for SdkCallError {
	fn from(message: &str) -> Self {
		Self(message.to_string())
	}
}

impl From<String> for SdkCallError {
	fn from(message: String) -> Self {
		Self(message)
	}
}

/// Errors that can occur while loading the relayer SDK.
#[derive(Debug, Error)]
pub enum LoaderError {
	/// No browser-like context (window and document) is available.
	#[error("RelayerSDKLoader: can only be used in the browser.")]
	Environment,
	/// A global SDK object is present but does not have the expected shape.
	#[error("RelayerSDKLoader: Unable to load FHEVM Relayer SDK: {reason}")]
	InvalidGlobal {
		/// Why the global failed validation.
		reason: String,
	},
	/// The script element fired its error event.
	#[error("RelayerSDKLoader: Failed to load Relayer SDK from {url}: {message}")]
	ScriptFailed {
		/// The script URL.
		url: String,
		/// The error reported by the host.
		message: String,
	},
	/// The script loaded but did not install a valid global.
	#[error(
		"RelayerSDKLoader: Relayer SDK script has been successfully loaded from {url}, however, the SDK global is invalid: {reason}"
	)]
	InvalidAfterLoad {
		/// The script URL.
		url: String,
		/// Why the global failed validation.
		reason: String,
	},
}

/// Errors that can occur while initializing the relayer SDK.
#[derive(Debug, Error)]
pub enum InitError {
	/// The SDK global is missing or invalid; it must be loaded first.
	#[error("The relayer SDK is not available, load it before initializing")]
	NotLoaded,
	/// The init entry point raised an error.
	#[error("Relayer SDK initialization failed: {0}")]
	Call(#[from] SdkCallError),
	/// The init entry point completed with a falsy result.
	#[error("Relayer SDK initialization was rejected")]
	Rejected,
}
