use super::{ResolutionError, SettingsLoader};
use crate::{DocgenError, Result, schema::SettingsSchema};

/// Tries several loaders in order; the first that knows the path wins.
///
/// Only "not found" outcomes fall through to the next loader. Any other
/// failure, such as malformed metadata, is reported immediately.
#[derive(Default)]
pub struct ChainedLoader {
    loaders: Vec<Box<dyn SettingsLoader>>,
}

impl ChainedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, loader: impl SettingsLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    fn first_found<T>(
        &self,
        path: &str,
        attempt: impl Fn(&dyn SettingsLoader) -> Result<T>,
    ) -> Result<T> {
        let mut last_miss = None;

        for loader in &self.loaders {
            match attempt(loader.as_ref()) {
                Err(DocgenError::Resolution(miss)) if miss.is_not_found() => {
                    last_miss = Some(miss);
                }
                outcome => return outcome,
            }
        }

        Err(last_miss
            .unwrap_or_else(|| ResolutionError::ClassNotFound(path.to_string()))
            .into())
    }
}

impl SettingsLoader for ChainedLoader {
    fn resolve(&self, class_path: &str) -> Result<SettingsSchema> {
        self.first_found(class_path, |loader| loader.resolve(class_path))
    }

    fn resolve_module(&self, module_path: &str) -> Result<Vec<SettingsSchema>> {
        self.first_found(module_path, |loader| loader.resolve_module(module_path))
    }
}
