//! Documentation rendering for resolved settings.
//!
//! Turns the resolved fields of one or more settings classes into Markdown,
//! a Markdown table, or a commented dotenv file.

mod dotenv;
mod generator;
mod markdown;
mod table;

pub use dotenv::render_dotenv;
pub use generator::{DocsGenerator, DocumentedClass};
pub use markdown::render_markdown;
pub use table::{render_property_table, render_tables};

use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

use crate::schema::ValueEntry;

/// Output formats understood by the renderer.
///
/// Deserialization accepts the same spellings as [`FromStr`], so a format read
/// from a file or the environment is as case-insensitive as the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One section per variable with examples and possible values.
    #[default]
    Markdown,

    /// One table per settings class.
    MarkdownTable,

    /// A commented `.env` template.
    Dotenv,
}

impl OutputFormat {
    /// Every supported format, in the order shown to users.
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Markdown,
        OutputFormat::MarkdownTable,
        OutputFormat::Dotenv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::MarkdownTable => "markdown-table",
            OutputFormat::Dotenv => "dotenv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim().to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == requested)
            .ok_or_else(|| FormatError::Unsupported {
                requested: s.to_string(),
                supported: OutputFormat::ALL.map(OutputFormat::as_str).join(", "),
            })
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let requested = String::deserialize(deserializer)?;
        requested.parse().map_err(de::Error::custom)
    }
}

/// Errors raised when choosing an output format.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported output format '{requested}' (expected one of: {supported})")]
    Unsupported { requested: String, supported: String },
}

/// Largest heading offset; keeps the deepest heading within Markdown's six levels.
pub const MAX_HEADING_OFFSET: u8 = 4;

/// Presentation knobs shared by all formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Extra levels added to every Markdown heading, at most [`MAX_HEADING_OFFSET`].
    pub heading_offset: usize,
}

impl RenderOptions {
    /// A Markdown heading marker `level` levels deep, shifted by the offset.
    pub fn heading(&self, level: usize) -> String {
        "#".repeat(level.saturating_add(self.heading_offset))
    }
}

/// Renders the documented classes in the requested format.
pub fn render(format: OutputFormat, classes: &[DocumentedClass], options: RenderOptions) -> String {
    match format {
        OutputFormat::Markdown => render_markdown(classes, options),
        OutputFormat::MarkdownTable => render_tables(classes, options),
        OutputFormat::Dotenv => render_dotenv(classes),
    }
}

/// Wraps text in an inline code span, widening the fence around backticks.
fn code(text: &str) -> String {
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

/// Inline rendering of a value entry, e.g. `` `debug`: Debug level ``.
fn inline_entry(entry: &ValueEntry) -> String {
    match &entry.explanation {
        Some(explanation) => format!("{}: {}", code(&entry.value), explanation),
        None => code(&entry.value),
    }
}
