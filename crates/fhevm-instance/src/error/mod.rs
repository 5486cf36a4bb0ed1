// SPDX-License-Identifier: GPL-3.0

//! Error types for FHEVM instance acquisition.
//!
//! This module contains all error types used throughout the `fhevm-instance` crate,
//! organized by context:
//!
//! - [`rpc::RpcClientError`] - Errors from JSON-RPC requests (node or wallet provider).
//! - [`sdk::LoaderError`] - Errors from loading the relayer SDK script.
//! - [`sdk::InitError`] - Errors from the one-time SDK initialization.
//! - [`sdk::SdkCallError`] - Errors raised by SDK capabilities.
//!
//! [`Error`] is what [`crate::InstanceFactory::create_instance`] returns; it keeps
//! every failure kind distinguishable, cancellation included.

pub mod rpc;
pub mod sdk;

pub use rpc::RpcClientError;
pub use sdk::{InitError, LoaderError, SdkCallError};
use thiserror::Error;

/// Errors that can occur while creating an FHEVM instance.
#[derive(Debug, Error)]
pub enum Error {
	/// Invoked outside a browser-like context.
	#[error("FHEVM instances can only be created in a browser-like context")]
	Environment,
	/// The chain id could not be determined.
	#[error("Chain resolution failed: {0}")]
	Resolution(#[from] RpcClientError),
	/// The relayer SDK could not be loaded.
	#[error("Loader error: {0}")]
	Loader(LoaderError),
	/// The relayer SDK could not be initialized.
	#[error("Initialization error: {0}")]
	Initialization(#[from] InitError),
	/// The network configuration of the SDK is malformed.
	#[error("Invalid configuration: {reason}")]
	InvalidConfig {
		/// What is wrong with the configuration.
		reason: String,
	},
	/// The instance creation entry point failed.
	#[error("Instance creation failed: {0}")]
	Creation(SdkCallError),
	/// The caller cancelled the operation.
	#[error("FHEVM operation was cancelled")]
	Cancelled,
}

impl Error {
	/// Whether the error was caused by the caller cancelling the operation.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

impl From<LoaderError> for Error {
	fn from(err: LoaderError) -> Self {
		match err {
			LoaderError::Environment => Error::Environment,
			err => Error::Loader(err),
		}
	}
}
