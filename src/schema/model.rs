use serde_json::Value;

/// Environment sourcing configuration declared by a settings class.
///
/// Both values are optional so that a nested settings class can tell apart
/// "not declared" (inherit from the parent) from an explicit empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// String prepended to every derived variable name.
    pub env_prefix: Option<String>,
    /// String joining path segments of nested sub-model fields.
    pub env_nested_delimiter: Option<String>,
}

/// A settings class or sub-model: a named, ordered collection of fields.
#[derive(Debug, Clone)]
pub struct SettingsSchema {
    /// Class name, as registered or as found under `$defs`.
    pub name: String,
    /// Human-friendly title from the schema, if any.
    pub title: Option<String>,
    /// Class-level documentation.
    pub description: Option<String>,
    /// Prefix and delimiter configuration.
    pub config: EnvConfig,
    /// True for settings classes, false for plain sub-models.
    pub is_settings: bool,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl SettingsSchema {
    /// Returns the title when present, the class name otherwise.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A single declared field of a [`SettingsSchema`].
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Declared field name.
    pub name: String,
    /// Short type label used in rendered output (e.g. `string`, `integer`).
    pub type_name: String,
    /// What the field's type is made of.
    pub kind: FieldKind,
    /// Default value or factory; `None` makes the field required.
    pub default: Option<DefaultValue>,
    /// Field documentation.
    pub description: Option<String>,
    /// Raw `examples`/`example` annotation, shape-checked during resolution.
    pub examples: Option<Value>,
    /// Raw `possible_values` annotation, shape-checked during resolution.
    pub possible_values: Option<Value>,
    /// Alternate source name(s) for the value.
    pub alias: Option<ValidationAlias>,
}

impl FieldSchema {
    /// A field is required when it has neither a default value nor a factory.
    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// Classification of a field's type.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Any type that maps to a single variable.
    Scalar,
    /// A literal or enum type with a closed set of allowed values.
    Literal(Vec<ValueEntry>),
    /// A nested schema; see [`SettingsSchema::is_settings`] for which kind.
    SubModel(Box<SettingsSchema>),
    /// A sub-model already being expanded further up the tree.
    ///
    /// Documented as one variable unless the naming rules call for expanding
    /// it, in which case the loop is an error.
    Cyclic {
        /// The loop, e.g. `Node -> Node`.
        cycle: String,
        /// Whether the referenced schema is a settings class.
        is_settings: bool,
    },
}

/// Where a field's default comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal default value.
    Value(Value),
    /// A named factory computing the default at runtime.
    Factory(String),
}

/// A single step of an alias path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSegment {
    Key(String),
    Index(u64),
}

/// An alternate name, path, or set of names used to source a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationAlias {
    /// A direct name override.
    Name(String),
    /// A path into a structured value; the first segment is always a key.
    Path(Vec<AliasSegment>),
    /// Several acceptable aliases, the first being the preferred one.
    Choices(Vec<ValidationAlias>),
}

impl ValidationAlias {
    /// Names under which the value may be supplied, preferred first.
    ///
    /// A path contributes only its first segment since that is the variable
    /// holding the structured value.
    pub fn source_names(&self) -> Vec<String> {
        match self {
            ValidationAlias::Name(name) => vec![name.clone()],
            ValidationAlias::Path(segments) => match segments.first() {
                Some(AliasSegment::Key(key)) => vec![key.clone()],
                _ => Vec::new(),
            },
            ValidationAlias::Choices(choices) => {
                choices.iter().flat_map(Self::source_names).collect()
            }
        }
    }
}

/// A documented value optionally paired with an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    pub value: String,
    pub explanation: Option<String>,
}

impl ValueEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            explanation: None,
        }
    }

    pub fn explained(value: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            explanation: Some(explanation.into()),
        }
    }
}

/// Formats a JSON value for documentation: strings bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}
