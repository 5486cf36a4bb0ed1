// SPDX-License-Identifier: GPL-3.0

use std::{
	fmt::Display,
	io::Result,
	sync::{Arc, Mutex},
};
#[cfg(test)]
pub(crate) use tests::MockCli;

pub(crate) mod traits {
	use std::{fmt::Display, io::Result};

	/// A command line interface.
	pub trait Cli {
		/// Returns whether the output should be in JSON format.
		fn is_json(&self) -> bool;
		/// Prints an info message.
		fn info(&mut self, text: impl Display) -> Result<()>;
		/// Prints a header of the prompt sequence.
		fn intro(&mut self, title: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence.
		fn outro(&mut self, message: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence with a failure style.
		fn outro_cancel(&mut self, message: impl Display) -> Result<()>;
		/// Prints a success message.
		fn success(&mut self, message: impl Display) -> Result<()>;
		/// Prints a warning message.
		fn warning(&mut self, message: impl Display) -> Result<()>;
		/// Constructs a new [`Spinner`].
		fn spinner(&mut self) -> Box<dyn Spinner + Send>;
	}

	/// A spinner.
	pub trait Spinner: Send {
		/// Starts the spinner.
		fn start(&self, message: &str);
		/// Stops the spinner.
		fn stop(&self, message: &str);
		/// Stops the spinner with an error message.
		fn error(&self, message: &str);
	}
}

/// A command line interface using cliclack.
///
/// In JSON mode, human-readable output goes to stderr so that stdout only carries the
/// JSON document.
pub(crate) struct Cli {
	pub(crate) json: bool,
}

impl Cli {
	fn print(&self, message: impl Display, log: impl FnOnce(String) -> Result<()>) -> Result<()> {
		if self.json {
			eprintln!("{message}");
			Ok(())
		} else {
			log(message.to_string())
		}
	}
}

impl traits::Cli for Cli {
	fn is_json(&self) -> bool {
		self.json
	}

	fn info(&mut self, text: impl Display) -> Result<()> {
		self.print(text, |m| cliclack::log::info(m))
	}

	fn intro(&mut self, title: impl Display) -> Result<()> {
		if self.json {
			return Ok(());
		}
		cliclack::intro(crate::style::banner(title))
	}

	fn outro(&mut self, message: impl Display) -> Result<()> {
		self.print(message, |m| cliclack::outro(m))
	}

	fn outro_cancel(&mut self, message: impl Display) -> Result<()> {
		self.print(message, |m| cliclack::outro_cancel(m))
	}

	fn success(&mut self, message: impl Display) -> Result<()> {
		self.print(message, |m| cliclack::log::success(m))
	}

	fn warning(&mut self, message: impl Display) -> Result<()> {
		self.print(message, |m| cliclack::log::warning(m))
	}

	fn spinner(&mut self) -> Box<dyn traits::Spinner + Send> {
		Box::new(Spinner { inner: Arc::new(Mutex::new(None)), json: self.json })
	}
}

/// A spinner using cliclack.
struct Spinner {
	inner: Arc<Mutex<Option<cliclack::ProgressBar>>>,
	json: bool,
}

impl traits::Spinner for Spinner {
	fn start(&self, message: &str) {
		if self.json {
			eprintln!("{message}");
			return;
		}
		let s = cliclack::spinner();
		s.start(message);
		if let Ok(mut inner) = self.inner.lock() {
			*inner = Some(s);
		}
	}

	fn stop(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() {
			if let Some(s) = inner.take() {
				s.stop(message);
			} else if self.json {
				eprintln!("{message}");
			}
		}
	}

	fn error(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() {
			if let Some(s) = inner.take() {
				s.error(message);
			} else if self.json {
				eprintln!("{message}");
			}
		}
	}
}
