use crate::schema::EnvConfig;

/// Effective naming rules for one settings class scope.
///
/// Built from the root class configuration and re-derived whenever the
/// resolver enters a nested settings class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvNaming {
    /// Prepended to every derived name; empty when no prefix applies.
    pub prefix: String,
    /// Joins nested path segments; `None` disables sub-model expansion.
    pub delimiter: Option<String>,
}

impl EnvNaming {
    /// Naming for a top-level settings class.
    pub fn for_root(config: &EnvConfig) -> Self {
        Self {
            prefix: config.env_prefix.clone().unwrap_or_default(),
            delimiter: non_empty(config.env_nested_delimiter.as_deref()),
        }
    }

    /// Naming for a settings class nested as a field of this scope.
    ///
    /// Each setting the child declares replaces the parent's outright; the
    /// rest is inherited. A declared prefix is used standalone, never appended
    /// to the parent's.
    pub fn for_nested_settings(&self, config: &EnvConfig) -> Self {
        Self {
            prefix: config
                .env_prefix
                .clone()
                .unwrap_or_else(|| self.prefix.clone()),
            delimiter: match &config.env_nested_delimiter {
                Some(delimiter) => non_empty(Some(delimiter)),
                None => self.delimiter.clone(),
            },
        }
    }

    /// Whether plain sub-model fields are documented one variable per leaf.
    pub fn expands_sub_models(&self) -> bool {
        self.delimiter.is_some()
    }

    /// Full variable name: prefix followed by the joined segments.
    pub fn env_name(&self, segments: &[String]) -> String {
        format!("{}{}", self.prefix, self.join(segments))
    }

    /// Uppercases each segment and joins them with the nested delimiter.
    pub fn join(&self, segments: &[String]) -> String {
        let delimiter = self.delimiter.as_deref().unwrap_or_default();
        segments
            .iter()
            .map(|segment| segment.to_uppercase())
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

fn non_empty(delimiter: Option<&str>) -> Option<String> {
    delimiter
        .filter(|delimiter| !delimiter.is_empty())
        .map(str::to_string)
}
