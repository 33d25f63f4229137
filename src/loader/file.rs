use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use super::{ClassPath, ResolutionError, SettingsLoader, validate_dotted};
use crate::{
    DocgenError, Result,
    schema::{SchemaDocument, SettingsSchema},
};

/// Loads settings classes from JSON Schema documents on disk.
///
/// The module part of a class path maps onto a file below one of the search
/// directories: `myapp.settings.AppSettings` reads `myapp/settings.json`. The
/// first directory containing the file wins.
#[derive(Debug, Clone)]
pub struct SchemaFileLoader {
    search_paths: Vec<PathBuf>,
}

impl SchemaFileLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Finds the document backing `module`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ModuleNotFound`] when no search directory
    /// contains it.
    pub fn locate_module(&self, module: &str) -> std::result::Result<PathBuf, ResolutionError> {
        let mut relative: PathBuf = module.split('.').collect();
        relative.set_extension("json");

        self.search_paths
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ResolutionError::ModuleNotFound {
                module: module.to_string(),
                searched: self
                    .search_paths
                    .iter()
                    .map(|dir| dir.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl SettingsLoader for SchemaFileLoader {
    fn resolve(&self, class_path: &str) -> Result<SettingsSchema> {
        let ClassPath { module, class } = ClassPath::parse(class_path)?;
        let path = self.locate_module(module)?;
        let document = read_document(&path)?;
        let schema_document = SchemaDocument::new(&document);

        let schema = schema_document
            .find_class(class)
            .ok_or_else(|| ResolutionError::ClassNotFound(class_path.to_string()))?;

        debug!(class_path, path = %path.display(), "resolved class from schema file");
        Ok(schema_document.build(class, schema)?)
    }

    fn resolve_module(&self, module_path: &str) -> Result<Vec<SettingsSchema>> {
        validate_dotted(module_path)?;
        let path = self.locate_module(module_path)?;
        let document = read_document(&path)?;
        let schema_document = SchemaDocument::new(&document);

        let root_name = module_path.rsplit('.').next().unwrap_or(module_path);
        let classes = schema_document.settings_classes(root_name);
        if classes.is_empty() {
            return Err(ResolutionError::EmptyModule(module_path.to_string()).into());
        }

        debug!(module_path, count = classes.len(), "resolved module from schema file");
        classes
            .into_iter()
            .map(|(name, schema)| {
                schema_document
                    .build(&name, schema)
                    .map_err(DocgenError::from)
            })
            .collect()
    }
}

fn read_document(path: &Path) -> std::result::Result<Value, ResolutionError> {
    let unreadable = |details: String| ResolutionError::UnreadableModule {
        path: path.to_path_buf(),
        details,
    };

    let content = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| unreadable(format!("invalid JSON: {e}")))
}
