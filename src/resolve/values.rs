//! Normalisation of `examples` and `possible_values` annotations.
//!
//! Both accept a list whose entries are a bare value, a single-element list
//! `[value]`, or a pair `[value, explanation]`. Examples may additionally be a
//! comma-separated string or a single scalar.

use serde_json::Value;

use crate::schema::{FieldKind, FieldSchema, SchemaError, ValueEntry, display_value};

/// Possible values of a field: the explicit annotation, else the literal type's values.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedShape`] when the annotation is not a list
/// of supported entries.
pub fn possible_values(field: &FieldSchema, path: &str) -> Result<Vec<ValueEntry>, SchemaError> {
    match (&field.possible_values, &field.kind) {
        (Some(raw), _) => parse_entries(raw, "possible_values", path, false, false),
        (None, FieldKind::Literal(values)) => Ok(values.clone()),
        (None, _) => Ok(Vec::new()),
    }
}

/// Examples of a field, or an empty list when none are declared.
///
/// Each entry of an array-typed field's examples is one whole example value,
/// never a `[value, explanation]` pair.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedShape`] for malformed list entries or
/// object-valued annotations.
pub fn examples(field: &FieldSchema, path: &str) -> Result<Vec<ValueEntry>, SchemaError> {
    match &field.examples {
        Some(raw) => parse_entries(raw, "examples", path, true, is_array(field)),
        None => Ok(Vec::new()),
    }
}

fn parse_entries(
    raw: &Value,
    annotation: &'static str,
    field: &str,
    allow_scalar: bool,
    whole_items: bool,
) -> Result<Vec<ValueEntry>, SchemaError> {
    let unsupported = |details: String| SchemaError::UnsupportedShape {
        field: field.to_string(),
        annotation,
        details,
    };

    match raw {
        Value::Array(items) if whole_items => Ok(items
            .iter()
            .map(|item| ValueEntry::new(display_value(item)))
            .collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| parse_entry(item).map_err(unsupported))
            .collect(),
        Value::String(text) if allow_scalar => Ok(split_delimited(text)),
        Value::Bool(_) | Value::Number(_) if allow_scalar => {
            Ok(vec![ValueEntry::new(display_value(raw))])
        }
        other => Err(unsupported(format!("expected a list, found {other}"))),
    }
}

fn parse_entry(item: &Value) -> Result<ValueEntry, String> {
    match item {
        Value::Array(parts) => match parts.as_slice() {
            [value] => Ok(ValueEntry::new(display_value(value))),
            [value, Value::String(explanation)] => {
                Ok(ValueEntry::explained(display_value(value), explanation.clone()))
            }
            [_, other] => Err(format!("explanation must be a string, found {other}")),
            parts => Err(format!(
                "expected [value] or [value, explanation], found {} elements",
                parts.len()
            )),
        },
        value => Ok(ValueEntry::new(display_value(value))),
    }
}

fn is_array(field: &FieldSchema) -> bool {
    matches!(field.kind, FieldKind::Scalar) && field.type_name == "array"
}

fn split_delimited(text: &str) -> Vec<ValueEntry> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ValueEntry::new)
        .collect()
}
