use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging level for the generator's diagnostics.
///
/// Diagnostics go to stderr and never mix with the generated document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Disable diagnostics entirely.
    Off,

    /// Only report failures.
    Error,

    /// Report failures and suspicious input (default level).
    #[default]
    Warn,

    /// Summarise each run.
    Info,

    /// Show loader and resolver decisions.
    Debug,

    /// Show every resolved field.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Off => write!(f, "off"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
