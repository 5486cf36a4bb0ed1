// SPDX-License-Identifier: GPL-3.0

//! The document hosting the SDK script.

use crate::strings::sdk::SCRIPT_TYPE;
use tokio::sync::oneshot;
use url::Url;

/// A script element to append to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptElement {
	/// Source URL.
	pub src: Url,
	/// MIME type.
	pub script_type: &'static str,
	/// Whether the script loads asynchronously.
	pub is_async: bool,
}

impl ScriptElement {
	/// A classic asynchronous script loaded from `src`.
	pub fn new(src: Url) -> Self {
		Self { src, script_type: SCRIPT_TYPE, is_async: true }
	}
}

/// How an appended script settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptEvent {
	/// The load event fired.
	Load,
	/// The error event fired (network or parse failure).
	Error(String),
}

/// A browser-like document the SDK script can be injected into.
///
/// Loading the SDK script installs its global into the [`crate::SdkRegistry`] shared
/// with the loader, before [`ScriptEvent::Load`] is delivered.
pub trait ScriptHost: Send + Sync {
	/// Whether a browser-like context (window and document) is available.
	fn is_browser(&self) -> bool;
	/// Whether a script element with source `src` is already in the document.
	fn has_script(&self, src: &Url) -> bool;
	/// Append `script` to the document.
	///
	/// The element is part of the document once this returns; the receiver
	/// settles with its load or error event.
	fn append_script(&self, script: ScriptElement) -> oneshot::Receiver<ScriptEvent>;
}

/// A [`ScriptHost`] for processes without a document, such as command line tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessHost;

impl ScriptHost for HeadlessHost {
	fn is_browser(&self) -> bool {
		false
	}

	fn has_script(&self, _src: &Url) -> bool {
		false
	}

	fn append_script(&self, script: ScriptElement) -> oneshot::Receiver<ScriptEvent> {
		let (tx, rx) = oneshot::channel();
		let _ = tx.send(ScriptEvent::Error(format!("no document to load {} into", script.src)));
		rx
	}
}
