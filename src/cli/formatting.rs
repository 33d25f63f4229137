//! Formatting utilities for terminal diagnostics.

use std::io::IsTerminal;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
}

/// Formats error messages with styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats an error for stderr, styled only when stderr is a terminal.
pub fn error_line(text: &str) -> String {
    let message = format!("error: {text}");
    if std::io::stderr().is_terminal() {
        format_error(&message)
    } else {
        message
    }
}
