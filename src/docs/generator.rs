use tracing::{debug, info, instrument};

use super::{OutputFormat, RenderOptions, render};
use crate::{
    Result,
    loader::SettingsLoader,
    resolve::{ResolvedField, resolve_fields},
    schema::SettingsSchema,
};

/// A settings class together with its resolved variables.
#[derive(Debug, Clone)]
pub struct DocumentedClass {
    /// Display title: the schema title, falling back to the class name.
    pub title: String,
    /// Class documentation, shown under the table heading.
    pub description: Option<String>,
    pub fields: Vec<ResolvedField>,
}

impl DocumentedClass {
    /// Resolves every field of `schema`.
    ///
    /// # Errors
    ///
    /// Returns a schema error when a field annotation has an unsupported shape
    /// or a recursive sub-model would have to be expanded.
    pub fn from_schema(schema: &SettingsSchema) -> Result<Self> {
        Ok(Self {
            title: schema.display_name().to_string(),
            description: schema.description.clone(),
            fields: resolve_fields(schema)?,
        })
    }
}

/// Drives loading, resolution and rendering for a set of classes.
pub struct DocsGenerator<'a> {
    loader: &'a dyn SettingsLoader,
    format: OutputFormat,
    options: RenderOptions,
}

impl<'a> DocsGenerator<'a> {
    /// Creates a generator producing Markdown with no heading offset.
    pub fn new(loader: &'a dyn SettingsLoader) -> Self {
        Self {
            loader,
            format: OutputFormat::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_heading_offset(mut self, heading_offset: usize) -> Self {
        self.options.heading_offset = heading_offset;
        self
    }

    /// Loads and resolves a single class.
    ///
    /// # Errors
    ///
    /// Returns the loader's resolution error or a schema error.
    pub fn document_class(&self, class_path: &str) -> Result<DocumentedClass> {
        let schema = self.loader.resolve(class_path)?;
        DocumentedClass::from_schema(&schema)
    }

    /// Loads and resolves every settings class of a module.
    ///
    /// # Errors
    ///
    /// Returns the loader's resolution error or a schema error.
    pub fn document_module(&self, module_path: &str) -> Result<Vec<DocumentedClass>> {
        self.loader
            .resolve_module(module_path)?
            .iter()
            .map(DocumentedClass::from_schema)
            .collect()
    }

    /// Renders the given classes followed by the classes of the given modules.
    ///
    /// # Errors
    ///
    /// Fails on the first class or module that cannot be loaded or resolved.
    #[instrument(skip(self), fields(format = %self.format))]
    pub fn generate(&self, class_paths: &[String], module_paths: &[String]) -> Result<String> {
        let mut classes = Vec::new();

        for class_path in class_paths {
            classes.push(self.document_class(class_path)?);
        }
        for module_path in module_paths {
            classes.extend(self.document_module(module_path)?);
        }

        let field_count: usize = classes.iter().map(|class| class.fields.len()).sum();
        debug!(classes = classes.len(), fields = field_count, "resolved settings");

        let output = render(self.format, &classes, self.options);
        info!(bytes = output.len(), "rendered documentation");
        Ok(output)
    }
}
