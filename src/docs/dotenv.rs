use super::{DocumentedClass, code};
use crate::{resolve::ResolvedField, schema::ValueEntry};

/// Renders a commented `.env` template.
///
/// Required variables are left uncommented with an empty value so that a
/// copied template fails loudly until filled in; optional ones are commented
/// out with their default.
pub fn render_dotenv(classes: &[DocumentedClass]) -> String {
    classes
        .iter()
        .flat_map(|class| &class.fields)
        .map(render_field)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_field(field: &ResolvedField) -> String {
    let mut lines = Vec::new();

    if let Some(description) = &field.description {
        lines.extend(description.trim().lines().map(comment));
    }
    if !field.alternative_env_names.is_empty() {
        lines.push(format!(
            "# Also read from: {}",
            field.alternative_env_names.join(", ")
        ));
    }
    if !field.examples.is_empty() {
        lines.push(format!("# Examples: {}", entry_list(&field.examples)));
    }
    if !field.possible_values.is_empty() {
        lines.push(format!(
            "# Possible values: {}",
            entry_list(&field.possible_values)
        ));
    }

    let default = field.default.as_deref().unwrap_or_default();
    if field.required {
        lines.push(format!("{}=", field.env_name));
    } else {
        lines.push(format!("# {}={}", field.env_name, default));
    }

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

fn comment(line: &str) -> String {
    if line.is_empty() {
        "#".to_string()
    } else {
        format!("# {line}")
    }
}

fn entry_list(entries: &[ValueEntry]) -> String {
    entries
        .iter()
        .map(|entry| match &entry.explanation {
            Some(explanation) => format!("{} ({explanation})", code(&entry.value)),
            None => code(&entry.value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
