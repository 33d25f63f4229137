use std::path::Path;

use thiserror::Error;

use crate::{docs::FormatError, loader::ResolutionError, schema::SchemaError};

/// Top-level error for every stage of documentation generation.
#[derive(Error, Debug)]
pub enum DocgenError {
    /// The requested settings class could not be located.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The requested output format is not supported.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Field metadata in the settings schema is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    TomlParse(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DocgenError>;

impl DocgenError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                DocgenError::TomlParse(format!(
                    "Failed to parse TOML at {}: {}",
                    clean_path.display(),
                    error
                ))
            }
            None => DocgenError::TomlParse(format!("Failed to parse TOML: {}", error)),
        }
    }
}
