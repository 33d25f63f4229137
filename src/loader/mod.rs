//! Resolution of settings classes from dotted class paths.
//!
//! A [`SettingsLoader`] turns a path such as `myapp.settings.AppSettings` into
//! a [`SettingsSchema`]. Loaders are plain values, so a caller can swap the
//! on-disk [`SchemaFileLoader`] for an in-process [`SettingsRegistry`], or
//! chain both with [`ChainedLoader`].

mod chain;
mod file;
mod registry;

pub use chain::ChainedLoader;
pub use file::SchemaFileLoader;
pub use registry::{SchemaFn, SettingsRegistry};

use std::{path::PathBuf, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::{Result, schema::SettingsSchema};

static DOTTED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .unwrap_or_else(|_| unreachable!("dotted path pattern is valid"))
});

/// Source of settings classes.
pub trait SettingsLoader {
    /// Resolves a single class by its dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the path does not name a known class,
    /// or a schema error when the class metadata is malformed.
    fn resolve(&self, class_path: &str) -> Result<SettingsSchema>;

    /// Resolves every settings class declared by a module, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the module is unknown or declares no
    /// settings classes.
    fn resolve_module(&self, module_path: &str) -> Result<Vec<SettingsSchema>>;
}

/// Errors raised while locating a settings class.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("invalid class path '{0}': expected a dotted path such as 'module.ClassName'")]
    InvalidClassPath(String),

    #[error("module '{module}' not found (searched: {searched})")]
    ModuleNotFound { module: String, searched: String },

    #[error("class '{0}' not found")]
    ClassNotFound(String),

    #[error("failed to read module '{}': {details}", path.display())]
    UnreadableModule { path: PathBuf, details: String },

    #[error("module '{0}' declares no settings classes")]
    EmptyModule(String),
}

impl ResolutionError {
    /// True when another loader might still know the path.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolutionError::ClassNotFound(_) | ResolutionError::ModuleNotFound { .. }
        )
    }
}

/// A class path split into its module and class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassPath<'a> {
    pub module: &'a str,
    pub class: &'a str,
}

impl<'a> ClassPath<'a> {
    /// Splits `module.path.ClassName`; at least one module segment is required.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidClassPath`] for anything that is not a
    /// dotted identifier with two or more segments.
    pub fn parse(path: &'a str) -> std::result::Result<Self, ResolutionError> {
        validate_dotted(path)?;
        path.rsplit_once('.')
            .map(|(module, class)| ClassPath { module, class })
            .ok_or_else(|| ResolutionError::InvalidClassPath(path.to_string()))
    }
}

/// Checks that `path` is a dotted identifier such as `pkg.module`.
///
/// # Errors
///
/// Returns [`ResolutionError::InvalidClassPath`] otherwise.
pub fn validate_dotted(path: &str) -> std::result::Result<(), ResolutionError> {
    if DOTTED_PATH.is_match(path) {
        Ok(())
    } else {
        Err(ResolutionError::InvalidClassPath(path.to_string()))
    }
}

#[cfg(test)]
mod tests;
