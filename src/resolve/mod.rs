//! Flattening of a settings tree into documented environment variables.
//!
//! Fields are visited in declaration order, depth-first into nested
//! sub-models. Every leaf produces exactly one [`ResolvedField`] carrying its
//! primary variable name.

mod env_name;
mod values;

pub use env_name::EnvNaming;
pub use values::{examples, possible_values};

use serde_json::Value;
use tracing::{instrument, trace};

use crate::schema::{
    DefaultValue, FieldKind, FieldSchema, SchemaError, SettingsSchema, ValueEntry, display_value,
};

/// A leaf field ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field names from the root class down to this leaf.
    pub path: Vec<String>,
    /// The variable a deployer sets.
    pub env_name: String,
    /// Further accepted variable names, from alias choices.
    pub alternative_env_names: Vec<String>,
    pub type_name: String,
    pub required: bool,
    /// Rendered default value, if any.
    pub default: Option<String>,
    pub description: Option<String>,
    pub examples: Vec<ValueEntry>,
    pub possible_values: Vec<ValueEntry>,
}

impl ResolvedField {
    /// Dotted field path, e.g. `sub_model.deep.leaf`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Position of the walk inside the settings tree.
struct Scope<'a> {
    naming: EnvNaming,
    path: Vec<String>,
    /// Variable name segments since the last naming reset.
    segments: Vec<String>,
    /// Set once an aliased sub-model field replaced the prefixed root segment.
    unprefixed: bool,
    ancestors_required: bool,
    inherited_default: Option<&'a Value>,
}

/// Resolves every leaf field of `schema`.
///
/// # Errors
///
/// Returns a [`SchemaError`] when an `examples` or `possible_values`
/// annotation has an unsupported shape, or when a recursive sub-model would
/// have to be expanded.
#[instrument(skip_all, fields(class = %schema.name))]
pub fn resolve_fields(schema: &SettingsSchema) -> Result<Vec<ResolvedField>, SchemaError> {
    let scope = Scope {
        naming: EnvNaming::for_root(&schema.config),
        path: Vec::new(),
        segments: Vec::new(),
        unprefixed: false,
        ancestors_required: true,
        inherited_default: None,
    };

    let mut resolved = Vec::new();
    walk(schema, &scope, &mut resolved)?;
    Ok(resolved)
}

fn walk<'a>(
    schema: &'a SettingsSchema,
    scope: &Scope<'a>,
    out: &mut Vec<ResolvedField>,
) -> Result<(), SchemaError> {
    for field in &schema.fields {
        let mut path = scope.path.clone();
        path.push(field.name.clone());
        let inherited = scope
            .inherited_default
            .and_then(|default| default.get(&field.name));

        match &field.kind {
            FieldKind::SubModel(nested) if nested.is_settings => {
                let child = Scope {
                    naming: scope.naming.for_nested_settings(&nested.config),
                    path,
                    segments: Vec::new(),
                    unprefixed: false,
                    ancestors_required: child_required(field, scope, inherited),
                    inherited_default: child_default(field, inherited),
                };
                walk(nested, &child, out)?;
            }
            FieldKind::SubModel(nested) if scope.naming.expands_sub_models() => {
                let names = source_names(field);
                let aliased_root = field.alias.is_some() && scope.segments.is_empty();
                let mut segments = scope.segments.clone();
                segments.extend(names.into_iter().take(1));

                let child = Scope {
                    naming: scope.naming.clone(),
                    path,
                    segments,
                    unprefixed: scope.unprefixed || aliased_root,
                    ancestors_required: child_required(field, scope, inherited),
                    inherited_default: child_default(field, inherited),
                };
                walk(nested, &child, out)?;
            }
            FieldKind::Cyclic { cycle, is_settings }
                if *is_settings || scope.naming.expands_sub_models() =>
            {
                return Err(SchemaError::CircularReference {
                    chain: cycle.clone(),
                });
            }
            _ => {
                let leaf = resolve_leaf(field, scope, path, inherited)?;
                trace!(env_name = %leaf.env_name, path = %leaf.dotted_path(), "resolved field");
                out.push(leaf);
            }
        }
    }
    Ok(())
}

fn resolve_leaf(
    field: &FieldSchema,
    scope: &Scope<'_>,
    path: Vec<String>,
    inherited: Option<&Value>,
) -> Result<ResolvedField, SchemaError> {
    // Aliased top-level fields are read verbatim, without the prefix.
    let unprefixed = scope.unprefixed || (field.alias.is_some() && scope.segments.is_empty());

    let mut env_names = source_names(field).into_iter().map(|name| {
        let mut segments = scope.segments.clone();
        segments.push(name);
        if unprefixed {
            scope.naming.join(&segments)
        } else {
            scope.naming.env_name(&segments)
        }
    });
    let env_name = env_names.next().unwrap_or_default();
    let alternative_env_names = env_names.collect();

    let dotted = path.join(".");
    let default = match &field.default {
        Some(DefaultValue::Value(value)) => Some(display_value(value)),
        Some(DefaultValue::Factory(factory)) => Some(format!("{factory}()")),
        None => inherited.map(display_value),
    };

    Ok(ResolvedField {
        env_name,
        alternative_env_names,
        type_name: field.type_name.clone(),
        required: field.required() && scope.ancestors_required && inherited.is_none(),
        default,
        description: field.description.clone(),
        examples: examples(field, &dotted)?,
        possible_values: possible_values(field, &dotted)?,
        path,
    })
}

/// Names the field is sourced under: its alias names, else its own name.
fn source_names(field: &FieldSchema) -> Vec<String> {
    let names = field
        .alias
        .as_ref()
        .map(|alias| alias.source_names())
        .unwrap_or_default();

    if names.is_empty() {
        vec![field.name.clone()]
    } else {
        names
    }
}

fn child_required(field: &FieldSchema, scope: &Scope<'_>, inherited: Option<&Value>) -> bool {
    scope.ancestors_required && field.required() && inherited.is_none()
}

fn child_default<'a>(field: &'a FieldSchema, inherited: Option<&'a Value>) -> Option<&'a Value> {
    match &field.default {
        Some(DefaultValue::Value(value)) => Some(value),
        Some(DefaultValue::Factory(_)) => None,
        None => inherited,
    }
}
