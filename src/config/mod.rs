//! Configuration of the documentation generator itself.
//!
//! Settings are layered from TOML files, `SETTINGS_DOCGEN_*` environment
//! variables and command-line flags. The configuration type derives
//! `JsonSchema`, so the generator can document its own variables.

mod loading;
mod log_level;
mod paths;

pub use loading::{ConfigLayer, ENV_PREFIX};
pub use log_level::LogLevel;
pub use paths::{ConfigPaths, PROJECT_CONFIG};

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    DocgenError, Result,
    docs::{MAX_HEADING_OFFSET, OutputFormat},
};

/// Settings of the documentation generator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
#[schemars(extend("settings_config" = {"env_prefix": "SETTINGS_DOCGEN_"}))]
pub struct DocgenConfig {
    /// Format used when no output format is given on the command line.
    pub output_format: OutputFormat,

    /// Extra levels added to every Markdown heading (0 to 4).
    #[schemars(extend("examples" = [0, 1, 2]))]
    pub heading_offset: usize,

    /// Directories searched for schema documents, in order.
    #[schemars(extend("examples" = [["schemas"], ["schemas:vendor/schemas", "Colon-separated list when set from the environment"]]))]
    pub search_paths: Vec<PathBuf>,

    /// Verbosity of diagnostics written to stderr.
    pub log_level: LogLevel,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            heading_offset: 0,
            search_paths: vec![PathBuf::from(".")],
            log_level: LogLevel::default(),
        }
    }
}

impl DocgenConfig {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`DocgenError::Config`] when `heading_offset` exceeds
    /// [`MAX_HEADING_OFFSET`].
    pub fn validate(&self) -> Result<()> {
        if self.heading_offset > usize::from(MAX_HEADING_OFFSET) {
            return Err(DocgenError::Config(format!(
                "heading_offset must be at most {MAX_HEADING_OFFSET}, got {}",
                self.heading_offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
