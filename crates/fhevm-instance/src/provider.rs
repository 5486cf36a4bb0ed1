// SPDX-License-Identifier: GPL-3.0

//! Network targets: wallet-style providers and plain RPC URLs.

use crate::{RpcClient, error::RpcClientError};
use serde_json::Value;
use std::{fmt, sync::Arc};
use url::Url;

/// A request-capable provider in the style of an EIP-1193 wallet.
#[async_trait::async_trait]
pub trait Eip1193Provider: Send + Sync {
	/// Issue the JSON-RPC `method` with positional `params`.
	async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcClientError>;
}

/// An [`Eip1193Provider`] speaking JSON-RPC over HTTP to a single endpoint.
#[derive(Debug)]
pub struct HttpProvider {
	client: RpcClient,
}

impl HttpProvider {
	/// Create a provider for `endpoint`.
	pub fn new(endpoint: &Url) -> Result<Self, RpcClientError> {
		Ok(Self { client: RpcClient::connect(endpoint)? })
	}

	/// The endpoint requests are sent to.
	pub fn endpoint(&self) -> &Url {
		self.client.endpoint()
	}
}

#[async_trait::async_trait]
impl Eip1193Provider for HttpProvider {
	async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcClientError> {
		self.client.request(method, params).await
	}
}

/// The network an instance is created for: either a provider or a literal RPC URL.
///
/// It is also the network transport handed to the SDK when the instance is created.
#[derive(Clone)]
pub enum NetworkTarget {
	/// A wallet-style provider.
	Provider(Arc<dyn Eip1193Provider>),
	/// An HTTP(S) RPC URL.
	Url(Url),
}

impl NetworkTarget {
	/// The RPC URL, if the target is a URL.
	pub fn url(&self) -> Option<&Url> {
		match self {
			Self::Provider(_) => None,
			Self::Url(url) => Some(url),
		}
	}
}

impl fmt::Debug for NetworkTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Provider(_) => f.write_str("Provider(..)"),
			Self::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
		}
	}
}

impl From<Url> for NetworkTarget {
	fn from(url: Url) -> Self {
		Self::Url(url)
	}
}

impl From<Arc<dyn Eip1193Provider>> for NetworkTarget {
	fn from(provider: Arc<dyn Eip1193Provider>) -> Self {
		Self::Provider(provider)
	}
}
