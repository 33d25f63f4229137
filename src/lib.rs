//! settings-docgen - environment variable documentation for settings classes.
//!
//! A settings class is described by a JSON Schema document, either produced
//! in-process by `schemars` or read from disk. The generator walks its
//! fields, derives the exact environment variable name of every leaf from
//! the class's prefix and nested delimiter, and renders the result as
//! Markdown, a Markdown table, or a dotenv template.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use settings_docgen::{docs::DocsGenerator, loader::SettingsRegistry, config::DocgenConfig};
//!
//! let registry = SettingsRegistry::new().register::<DocgenConfig>("app.DocgenConfig");
//! let markdown = DocsGenerator::new(&registry)
//!     .generate(&["app.DocgenConfig".to_string()], &[])
//!     .unwrap_or_default();
//! println!("{markdown}");
//! ```

/// Command-line interface.
pub mod cli;

/// Layered configuration of the generator itself.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Rendering of resolved settings into documents.
pub mod docs;

/// Resolution of class paths into settings schemas.
pub mod loader;

/// Field resolution and environment variable naming.
pub mod resolve;

/// Settings class model built from JSON Schema.
pub mod schema;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{DocgenError, Result};
