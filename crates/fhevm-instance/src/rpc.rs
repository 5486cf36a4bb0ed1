// SPDX-License-Identifier: GPL-3.0

//! Transient JSON-RPC client for talking to EVM nodes.
//!
//! Chain resolution and the mock metadata probe both open a short-lived
//! connection, issue one request and release it. [`RpcClient`] owns the
//! underlying HTTP client, so the connection is released when the client goes
//! out of scope, whichever way the enclosing function returns.

use crate::{ChainId, error::RpcClientError, strings::rpc::methods};
use jsonrpsee::{
	core::{client::ClientT, params::ArrayParams},
	http_client::{HttpClient, HttpClientBuilder},
};
use serde_json::Value;
use url::Url;

/// JSON-RPC client bound to a single endpoint.
///
/// # Example
///
/// ```ignore
/// use fhevm_instance::RpcClient;
///
/// let client = RpcClient::connect(&"http://localhost:8545".parse()?)?;
/// let chain_id = client.chain_id().await?;
/// ```
#[derive(Debug)]
pub struct RpcClient {
	client: HttpClient,
	endpoint: Url,
}

impl RpcClient {
	/// Open a connection to `endpoint`.
	///
	/// # Arguments
	/// * `endpoint` - HTTP(S) URL of the node's RPC endpoint (e.g., `http://localhost:8545`)
	pub fn connect(endpoint: &Url) -> Result<Self, RpcClientError> {
		let client = HttpClientBuilder::default().build(endpoint.as_str()).map_err(|e| {
			RpcClientError::ConnectionFailed {
				endpoint: endpoint.to_string(),
				message: e.to_string(),
			}
		})?;
		log::trace!("opened connection to {endpoint}");
		Ok(Self { client, endpoint: endpoint.clone() })
	}

	/// Get the endpoint URL this client is connected to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Issue a raw request, returning the untyped result.
	pub async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcClientError> {
		let mut array = ArrayParams::new();
		for param in params {
			array
				.insert(param)
				.map_err(|e| RpcClientError::request_failed(method, format!("bad params: {e}")))?;
		}
		self.client
			.request::<Value, _>(method, array)
			.await
			.map_err(|e| RpcClientError::request_failed(method, e))
	}

	/// Get the chain id the node is serving.
	pub async fn chain_id(&self) -> Result<ChainId, RpcClientError> {
		let value = self.request(methods::ETH_CHAIN_ID, vec![]).await?;
		parse_chain_id(&value)
	}

	/// Get the client version string of the node.
	///
	/// Returns `None` when the node answers with something other than a string.
	pub async fn client_version(&self) -> Result<Option<String>, RpcClientError> {
		let value = self.request(methods::WEB3_CLIENT_VERSION, vec![]).await?;
		Ok(value.as_str().map(str::to_string))
	}

	/// Get the relayer bootstrap metadata served by FHEVM development nodes.
	///
	/// Other nodes reject the method as not found.
	pub async fn relayer_metadata(&self) -> Result<Value, RpcClientError> {
		self.request(methods::FHEVM_RELAYER_METADATA, vec![]).await
	}
}

impl Drop for RpcClient {
	fn drop(&mut self) {
		log::trace!("released connection to {}", self.endpoint);
	}
}

/// Parse the result of an `eth_chainId` request: a hexadecimal quantity such as `0x7a69`.
pub(crate) fn parse_chain_id(value: &Value) -> Result<ChainId, RpcClientError> {
	let raw = value.as_str().ok_or_else(|| {
		RpcClientError::InvalidResponse(format!("expected a hex chain id, got {value}"))
	})?;
	let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw);
	// `from_str_radix` also accepts a leading sign.
	if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(RpcClientError::InvalidResponse(format!("invalid chain id `{raw}`")));
	}
	ChainId::from_str_radix(digits, 16)
		.map_err(|e| RpcClientError::InvalidResponse(format!("invalid chain id `{raw}`: {e}")))
}
