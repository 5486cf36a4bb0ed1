// SPDX-License-Identifier: GPL-3.0

//! Terminal styling. Human output is styled; messages printed to stderr in JSON mode
//! stay plain.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use console::style;
use std::fmt::Display;
use url::Url;

/// Accent of the banner and of help headings.
const ACCENT: AnsiColor = AnsiColor::Yellow;

/// Help output styles, following the banner accent.
pub(crate) fn get_styles() -> Styles {
	let accent = Style::new().fg_color(Some(Color::Ansi(ACCENT)));
	let error = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));
	Styles::styled()
		.header(accent.bold())
		.usage(accent.bold())
		.literal(Style::new().bold())
		.placeholder(Style::new().italic())
		.error(error)
		.invalid(error)
		.valid(accent.underline())
}

/// The intro line of a command, e.g. ` FHEVM : Resolve chain`.
pub(crate) fn banner(title: impl Display) -> String {
	format!("{}: {title}", style(" FHEVM ").black().on_yellow())
}

/// A URL as it appears in messages.
pub(crate) fn format_url(url: &Url, json: bool) -> String {
	if json { url.to_string() } else { style(url).bold().underlined().to_string() }
}
