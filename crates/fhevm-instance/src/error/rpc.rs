// SPDX-License-Identifier: GPL-3.0

//! RPC client error types.

use thiserror::Error;

/// Errors that can occur when talking to a node or a wallet provider.
#[derive(Debug, Error)]
pub enum RpcClientError {
	/// Failed to connect to the RPC endpoint.
	#[error("Failed to connect to {endpoint}: {message}")]
	ConnectionFailed {
		/// The endpoint URL that failed to connect.
		endpoint: String,
		/// The error message describing the failure.
		message: String,
	},
	/// RPC request failed.
	#[error("RPC request `{method}` failed: {message}")]
	RequestFailed {
		/// The RPC method that failed.
		method: String,
		/// The error message describing the failure.
		message: String,
	},
	/// Invalid response from RPC.
	#[error("Invalid RPC response: {0}")]
	InvalidResponse(String),
}

impl RpcClientError {
	/// Shorthand for a [`RpcClientError::RequestFailed`] raised by `method`.
	pub(crate) fn request_failed(method: &str, message: impl ToString) -> Self {
		Self::RequestFailed { method: method.to_string(), message: message.to_string() }
	}
}
