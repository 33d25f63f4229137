use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use toml::{Table, Value};
use tracing::debug;

use super::{ConfigPaths, DocgenConfig};
use crate::{
    DocgenError, Result,
    tracing_config::{LOG_FILTER_ENV, LOG_FORMAT_ENV},
};

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "SETTINGS_DOCGEN_";

/// Variables sharing the prefix that configure logging instead.
const LOGGING_VARS: &[&str] = &[LOG_FILTER_ENV, LOG_FORMAT_ENV];

/// Keys holding path lists; their environment values are split like `PATH`.
const PATH_LIST_KEYS: &[&str] = &["search_paths"];

/// A TOML file taking part in the configuration stack.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    path: PathBuf,
    required: bool,
}

impl ConfigLayer {
    /// A layer that is skipped when the file does not exist.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// A layer whose absence is an error.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    fn read(&self) -> Result<Option<Value>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let table: Table = toml::from_str(&content)
                    .map_err(|e| DocgenError::toml_parse(e, Some(self.path.as_path())))?;
                debug!(path = %self.path.display(), "loaded configuration layer");
                Ok(Some(Value::Table(table)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !self.required => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DocgenError::Config(format!(
                "config file not found: {}",
                self.path.display()
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

impl DocgenConfig {
    /// Loads the configuration for this process.
    ///
    /// Layers, lowest precedence first: built-in defaults, the user file,
    /// the project file in the working directory, the `explicit` file, and
    /// `SETTINGS_DOCGEN_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, any file is not
    /// valid TOML, or the merged values do not form a valid configuration.
    /// Out-of-range values are rejected by [`DocgenConfig::validate`].
    pub fn load(explicit: Option<&Path>) -> Result<DocgenConfig> {
        let mut layers = Vec::new();
        if let Some(user) = ConfigPaths::user_config() {
            layers.push(ConfigLayer::optional(user));
        }
        layers.push(ConfigLayer::optional(ConfigPaths::project_config()));
        if let Some(path) = explicit {
            layers.push(ConfigLayer::required(path));
        }

        Self::from_layers(&layers, env::vars())
    }

    /// Merges the given layers and environment variables over the defaults.
    ///
    /// Tables merge recursively; any other value from a later layer replaces
    /// the earlier one.
    ///
    /// # Errors
    ///
    /// Same as [`DocgenConfig::load`].
    pub fn from_layers(
        layers: &[ConfigLayer],
        env_vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<DocgenConfig> {
        let mut merged = Value::Table(Table::new());

        for layer in layers {
            if let Some(value) = layer.read()? {
                merged = merge_toml_values(merged, value);
            }
        }
        merged = merge_toml_values(merged, Value::Table(env_overrides(env_vars)));

        let config: DocgenConfig = merged.try_into().map_err(|e| {
            DocgenError::Config(format!("Invalid configuration after merging layers: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn merge_toml_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            let mut merged_table = base_table;

            for (key, overlay_value) in overlay_table {
                let merged_value = match merged_table.remove(&key) {
                    Some(base_value) => merge_toml_values(base_value, overlay_value),
                    None => overlay_value,
                };
                merged_table.insert(key, merged_value);
            }

            Value::Table(merged_table)
        }

        (_, overlay) => overlay,
    }
}

pub(super) fn env_overrides(env_vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let mut table = Table::new();

    for (name, value) in env_vars {
        if LOGGING_VARS.contains(&name.as_str()) {
            continue;
        }
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }

        let key = key.to_lowercase();
        let value = if PATH_LIST_KEYS.contains(&key.as_str()) {
            Value::Array(
                env::split_paths(&value)
                    .map(|path| Value::String(path.to_string_lossy().into_owned()))
                    .collect(),
            )
        } else {
            coerce_value(&value)
        };
        table.insert(key, value);
    }

    table
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
