//! Construction of [`SettingsSchema`] trees from JSON Schema documents.
//!
//! Accepts the documents produced by `schemars` as well as other generators
//! emitting draft 2020-12 or draft-07 style schemas: references may point into
//! `$defs` or `definitions`, and nullable or wrapped references
//! (`anyOf`/`oneOf`/`allOf` with a single non-null branch) are unwrapped.

use serde_json::{Map, Value};

use super::{
    AliasSegment, DefaultValue, EnvConfig, FieldKind, FieldSchema, SchemaError, SettingsSchema,
    ValidationAlias, ValueEntry, display_value,
    ref_chain::{RefChain, ref_name},
};

const SETTINGS_CONFIG: &str = "settings_config";

/// A JSON Schema document from which settings classes are read.
///
/// References are resolved against the document root, so classes found under
/// `$defs` can point at their siblings.
pub struct SchemaDocument<'a> {
    root: &'a Value,
}

impl<'a> SchemaDocument<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Looks up a class by name: the root when its `title` matches, otherwise
    /// the `$defs` (or `definitions`) entry with that name.
    pub fn find_class(&self, name: &str) -> Option<&'a Value> {
        let root_title = self.root.get("title").and_then(Value::as_str);
        if root_title == Some(name) {
            return Some(self.root);
        }
        self.definition(name)
    }

    /// Lists every settings class in the document, in document order.
    ///
    /// The root counts when it declares properties; definitions count only
    /// when they carry a `settings_config` block. `root_name` names an untitled root.
    pub fn settings_classes(&self, root_name: &str) -> Vec<(String, &'a Value)> {
        let mut classes = Vec::new();

        if self.root.get("properties").is_some() {
            let name = self
                .root
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(root_name);
            classes.push((name.to_string(), self.root));
        }

        for defs in ["$defs", "definitions"] {
            if let Some(Value::Object(entries)) = self.root.get(defs) {
                classes.extend(
                    entries
                        .iter()
                        .filter(|(_, schema)| schema.get(SETTINGS_CONFIG).is_some())
                        .map(|(name, schema)| (name.clone(), schema)),
                );
            }
        }

        classes
    }

    /// Builds the settings tree rooted at `schema`, expanding every reference.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the metadata is malformed, a reference
    /// cannot be resolved, or sub-models reference each other in a cycle.
    pub fn build(&self, name: &str, schema: &'a Value) -> Result<SettingsSchema, SchemaError> {
        let mut chain = RefChain::new();
        self.build_schema(name, schema, &mut chain)
    }

    fn definition(&self, name: &str) -> Option<&'a Value> {
        ["$defs", "definitions"]
            .iter()
            .find_map(|defs| self.root.get(*defs).and_then(|entries| entries.get(name)))
    }

    fn resolve_ref(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        self.root.pointer(pointer)
    }

    fn build_schema(
        &self,
        name: &str,
        schema: &'a Value,
        chain: &mut RefChain,
    ) -> Result<SettingsSchema, SchemaError> {
        let object = schema
            .as_object()
            .ok_or_else(|| SchemaError::InvalidDocument {
                class: name.to_string(),
                details: "schema is not a JSON object".to_string(),
            })?;

        let (config, is_settings) = parse_settings_config(name, object.get(SETTINGS_CONFIG))?;

        let required: Vec<&str> = object
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let fields = match object.get("properties") {
            None => Vec::new(),
            Some(Value::Object(properties)) => properties
                .iter()
                .map(|(field_name, property)| {
                    let listed = required.contains(&field_name.as_str());
                    self.build_field(name, field_name, property, listed, chain)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(SchemaError::InvalidDocument {
                    class: name.to_string(),
                    details: "`properties` is not an object".to_string(),
                });
            }
        };

        Ok(SettingsSchema {
            name: name.to_string(),
            title: string_field(object, "title"),
            description: string_field(object, "description"),
            config,
            is_settings,
            fields,
        })
    }

    fn build_field(
        &self,
        class: &str,
        name: &str,
        property: &'a Value,
        listed_required: bool,
        chain: &mut RefChain,
    ) -> Result<FieldSchema, SchemaError> {
        let object = property
            .as_object()
            .ok_or_else(|| SchemaError::InvalidDocument {
                class: class.to_string(),
                details: format!("property `{name}` is not a JSON object"),
            })?;

        let core = unwrap_single_branch(property);
        let (kind, type_name) = match core.get("$ref").and_then(Value::as_str) {
            Some(reference) => self.referenced_kind(class, reference, chain)?,
            None => self.inline_kind(name, core, chain)?,
        };

        Ok(FieldSchema {
            name: name.to_string(),
            type_name,
            kind,
            default: parse_default(class, name, object, listed_required)?,
            description: string_field(object, "description"),
            examples: object
                .get("examples")
                .or_else(|| object.get("example"))
                .cloned(),
            possible_values: object.get("possible_values").cloned(),
            alias: object
                .get("validation_alias")
                .map(|alias| parse_alias(class, name, alias))
                .transpose()?,
        })
    }

    fn referenced_kind(
        &self,
        class: &str,
        reference: &str,
        chain: &mut RefChain,
    ) -> Result<(FieldKind, String), SchemaError> {
        let target = self
            .resolve_ref(reference)
            .ok_or_else(|| SchemaError::UnresolvedReference {
                class: class.to_string(),
                reference: reference.to_string(),
            })?;
        let type_name = ref_name(reference).to_string();

        if let Some(values) = literal_values(target) {
            return Ok((FieldKind::Literal(values), type_name));
        }

        if target.get("properties").is_some() {
            // Whether the loop matters depends on the naming in effect, which
            // only the resolver knows.
            if let Some(cycle) = chain.cycle_through(reference) {
                let is_settings = target.get(SETTINGS_CONFIG).is_some();
                return Ok((FieldKind::Cyclic { cycle, is_settings }, type_name));
            }
            chain.push(reference);
            let nested = self.build_schema(&type_name, target, chain);
            chain.pop();
            return Ok((FieldKind::SubModel(Box::new(nested?)), type_name));
        }

        Ok((FieldKind::Scalar, type_label(target)))
    }

    fn inline_kind(
        &self,
        field: &str,
        schema: &'a Value,
        chain: &mut RefChain,
    ) -> Result<(FieldKind, String), SchemaError> {
        if let Some(values) = literal_values(schema) {
            return Ok((FieldKind::Literal(values), type_label(schema)));
        }

        if schema.get("properties").is_some() {
            let nested = self.build_schema(field, schema, chain)?;
            return Ok((FieldKind::SubModel(Box::new(nested)), "object".to_string()));
        }

        Ok((FieldKind::Scalar, type_label(schema)))
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_settings_config(
    class: &str,
    raw: Option<&Value>,
) -> Result<(EnvConfig, bool), SchemaError> {
    let Some(raw) = raw else {
        return Ok((EnvConfig::default(), false));
    };

    let object = raw
        .as_object()
        .ok_or_else(|| SchemaError::InvalidSettingsConfig {
            class: class.to_string(),
            details: "`settings_config` must be an object".to_string(),
        })?;

    let read = |key: &str| -> Result<Option<String>, SchemaError> {
        match object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(SchemaError::InvalidSettingsConfig {
                class: class.to_string(),
                details: format!("`{key}` must be a string, found {other}"),
            }),
        }
    };

    let config = EnvConfig {
        env_prefix: read("env_prefix")?,
        env_nested_delimiter: read("env_nested_delimiter")?,
    };
    Ok((config, true))
}

fn parse_default(
    class: &str,
    field: &str,
    object: &Map<String, Value>,
    listed_required: bool,
) -> Result<Option<DefaultValue>, SchemaError> {
    if let Some(value) = object.get("default") {
        return Ok(Some(DefaultValue::Value(value.clone())));
    }

    match object.get("default_factory") {
        Some(Value::String(factory)) => Ok(Some(DefaultValue::Factory(factory.clone()))),
        Some(other) => Err(SchemaError::UnsupportedShape {
            field: format!("{class}.{field}"),
            annotation: "default_factory",
            details: format!("expected a factory name, found {other}"),
        }),
        // Optional per JSON Schema semantics: absent means null.
        None if !listed_required => Ok(Some(DefaultValue::Value(Value::Null))),
        None => Ok(None),
    }
}

fn parse_alias(class: &str, field: &str, raw: &Value) -> Result<ValidationAlias, SchemaError> {
    let invalid = |details: String| SchemaError::InvalidAlias {
        field: format!("{class}.{field}"),
        details,
    };

    match raw {
        Value::String(name) if !name.is_empty() => Ok(ValidationAlias::Name(name.clone())),
        Value::Array(segments) => parse_alias_path(segments).map_err(invalid),
        Value::Object(object) => {
            let choices = object
                .get("choices")
                .and_then(Value::as_array)
                .filter(|choices| !choices.is_empty())
                .ok_or_else(|| invalid("expected a non-empty `choices` list".to_string()))?;

            choices
                .iter()
                .map(|choice| match choice {
                    Value::String(name) if !name.is_empty() => {
                        Ok(ValidationAlias::Name(name.clone()))
                    }
                    Value::Array(segments) => parse_alias_path(segments).map_err(invalid),
                    other => Err(invalid(format!("unsupported alias choice {other}"))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ValidationAlias::Choices)
        }
        other => Err(invalid(format!("unsupported alias {other}"))),
    }
}

fn parse_alias_path(segments: &[Value]) -> Result<ValidationAlias, String> {
    let mut parsed = Vec::with_capacity(segments.len());

    for (position, segment) in segments.iter().enumerate() {
        match segment {
            Value::String(key) => parsed.push(AliasSegment::Key(key.clone())),
            Value::Number(n) if position > 0 => match n.as_u64() {
                Some(index) => parsed.push(AliasSegment::Index(index)),
                None => return Err(format!("alias path index {n} is not a non-negative integer")),
            },
            other => return Err(format!("unsupported alias path segment {other}")),
        }
    }

    if parsed.is_empty() {
        return Err("alias path is empty".to_string());
    }
    Ok(ValidationAlias::Path(parsed))
}

/// Strips `anyOf`/`oneOf`/`allOf` wrappers that hold exactly one non-null branch.
fn unwrap_single_branch(schema: &Value) -> &Value {
    for combinator in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(branches)) = schema.get(combinator) {
            let mut non_null = branches.iter().filter(|branch| !is_null_schema(branch));
            if let (Some(only), None) = (non_null.next(), non_null.next()) {
                return unwrap_single_branch(only);
            }
        }
    }
    schema
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

/// Allowed values of a literal or enum schema, or `None` for any other schema.
fn literal_values(schema: &Value) -> Option<Vec<ValueEntry>> {
    if let Some(Value::Array(values)) = schema.get("enum") {
        return Some(
            values
                .iter()
                .filter(|value| !value.is_null())
                .map(|value| ValueEntry::new(display_value(value)))
                .collect(),
        );
    }

    if let Some(value) = schema.get("const") {
        return Some(vec![ValueEntry::new(display_value(value))]);
    }

    for combinator in ["oneOf", "anyOf"] {
        if let Some(Value::Array(branches)) = schema.get(combinator) {
            return documented_variants(branches);
        }
    }

    None
}

/// Variants of an enum whose branches are each a documented constant.
fn documented_variants(branches: &[Value]) -> Option<Vec<ValueEntry>> {
    let mut entries = Vec::new();

    for branch in branches.iter().filter(|branch| !is_null_schema(branch)) {
        let explanation = branch
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        let values = literal_values(branch)?;

        entries.extend(values.into_iter().map(|entry| ValueEntry {
            explanation: explanation.clone(),
            ..entry
        }));
    }

    (!entries.is_empty()).then_some(entries)
}

fn type_label(schema: &Value) -> String {
    match schema.get("type") {
        Some(Value::String(type_of)) => match schema.get("format").and_then(Value::as_str) {
            Some(format) => format!("{type_of} ({format})"),
            None => type_of.clone(),
        },
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .filter(|type_of| *type_of != "null")
            .collect::<Vec<_>>()
            .join(" | "),
        _ if schema.get("enum").is_some() || schema.get("const").is_some() => "enum".to_string(),
        _ if schema.get("properties").is_some() => "object".to_string(),
        _ => "any".to_string(),
    }
}
