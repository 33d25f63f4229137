use schemars::{JsonSchema, Schema, schema_for};
use tracing::debug;

use super::{ResolutionError, SettingsLoader};
use crate::{
    Result,
    schema::{SchemaDocument, SchemaError, SettingsSchema},
};

/// Produces the JSON Schema of a registered settings type.
pub type SchemaFn = fn() -> Schema;

/// In-process registry of settings classes keyed by class path.
///
/// Entries keep their registration order, which is also the order used by
/// [`SettingsLoader::resolve_module`].
#[derive(Default)]
pub struct SettingsRegistry {
    entries: Vec<(String, SchemaFn)>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema generator under `class_path`.
    pub fn with_class(mut self, class_path: impl Into<String>, schema_fn: SchemaFn) -> Self {
        self.entries.push((class_path.into(), schema_fn));
        self
    }

    /// Registers a type deriving [`JsonSchema`] under `class_path`.
    pub fn register<T: JsonSchema>(self, class_path: impl Into<String>) -> Self {
        self.with_class(class_path, schema_of::<T>)
    }

    /// Registered class paths in registration order.
    pub fn class_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }
}

impl SettingsLoader for SettingsRegistry {
    fn resolve(&self, class_path: &str) -> Result<SettingsSchema> {
        let (path, schema_fn) = self
            .entries
            .iter()
            .find(|(path, _)| path == class_path)
            .ok_or_else(|| ResolutionError::ClassNotFound(class_path.to_string()))?;

        debug!(class_path, "resolved class from registry");
        build_registered(path, *schema_fn)
    }

    fn resolve_module(&self, module_path: &str) -> Result<Vec<SettingsSchema>> {
        let prefix = format!("{module_path}.");
        let classes: Vec<SettingsSchema> = self
            .entries
            .iter()
            .filter(|(path, _)| {
                path.strip_prefix(&prefix)
                    .is_some_and(|class| !class.contains('.'))
            })
            .map(|(path, schema_fn)| build_registered(path, *schema_fn))
            .collect::<Result<_>>()?;

        if classes.is_empty() {
            return Err(ResolutionError::ModuleNotFound {
                module: module_path.to_string(),
                searched: "built-in registry".to_string(),
            }
            .into());
        }
        Ok(classes)
    }
}

fn schema_of<T: JsonSchema>() -> Schema {
    schema_for!(T)
}

fn build_registered(class_path: &str, schema_fn: SchemaFn) -> Result<SettingsSchema> {
    let name = class_path.rsplit('.').next().unwrap_or(class_path);
    let value = serde_json::to_value(schema_fn()).map_err(|e| SchemaError::InvalidDocument {
        class: name.to_string(),
        details: format!("failed to serialize schema: {e}"),
    })?;

    Ok(SchemaDocument::new(&value).build(name, &value)?)
}
