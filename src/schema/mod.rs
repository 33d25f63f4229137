//! Static description of settings classes and their fields.
//!
//! A [`SettingsSchema`] is built once from a JSON Schema document (see
//! [`SchemaDocument`]) and never mutated afterwards; resolution and rendering
//! are pure functions over it.

mod json;
mod model;
mod ref_chain;

pub use json::SchemaDocument;
pub use model::{
    AliasSegment, DefaultValue, EnvConfig, FieldKind, FieldSchema, SettingsSchema,
    ValidationAlias, ValueEntry, display_value,
};

use thiserror::Error;

/// Errors raised when settings metadata is malformed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// The document or one of its parts has the wrong structure.
    #[error("invalid schema for '{class}': {details}")]
    InvalidDocument { class: String, details: String },

    /// The `settings_config` block cannot be interpreted.
    #[error("invalid settings_config for '{class}': {details}")]
    InvalidSettingsConfig { class: String, details: String },

    /// A `$ref` points outside the document.
    #[error("unresolved reference '{reference}' in '{class}'")]
    UnresolvedReference { class: String, reference: String },

    /// Sub-models reference each other in a loop.
    #[error("circular sub-model reference: {chain}")]
    CircularReference { chain: String },

    /// An annotation such as `possible_values` has an unsupported shape.
    #[error("unsupported {annotation} for '{field}': {details}")]
    UnsupportedShape {
        field: String,
        annotation: &'static str,
        details: String,
    },

    /// The validation alias is neither a name, a path nor a set of choices.
    #[error("invalid validation_alias for '{field}': {details}")]
    InvalidAlias { field: String, details: String },
}
