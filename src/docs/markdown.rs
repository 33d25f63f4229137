use super::{DocumentedClass, RenderOptions, code, inline_entry};
use crate::{resolve::ResolvedField, schema::ValueEntry};

/// Renders one Markdown section per variable.
///
/// Each section opens with a heading naming the variable, followed by its
/// required/optional status, description, and sub-lists of examples and
/// possible values. Sections of all classes are emitted back to back.
pub fn render_markdown(classes: &[DocumentedClass], options: RenderOptions) -> String {
    classes
        .iter()
        .flat_map(|class| &class.fields)
        .map(|field| render_field(field, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_field(field: &ResolvedField, options: RenderOptions) -> String {
    let mut paragraphs = vec![
        format!("{} {}", options.heading(1), code(&field.env_name)),
        status_line(field),
    ];

    if !field.alternative_env_names.is_empty() {
        let names: Vec<String> = field
            .alternative_env_names
            .iter()
            .map(|name| code(name))
            .collect();
        paragraphs.push(format!("Also read from: {}", names.join(", ")));
    }

    if let Some(description) = &field.description {
        paragraphs.push(description.trim().to_string());
    }

    push_entries(&mut paragraphs, options, "Examples", &field.examples);
    push_entries(&mut paragraphs, options, "Possible values", &field.possible_values);

    let mut section = paragraphs.join("\n\n");
    section.push('\n');
    section
}

fn status_line(field: &ResolvedField) -> String {
    match (&field.default, field.required) {
        (_, true) => "**Required**".to_string(),
        (Some(default), false) => format!("*Optional*, default value: {}", code(default)),
        (None, false) => "*Optional*".to_string(),
    }
}

fn push_entries(
    paragraphs: &mut Vec<String>,
    options: RenderOptions,
    title: &str,
    entries: &[ValueEntry],
) {
    if entries.is_empty() {
        return;
    }

    paragraphs.push(format!("{} {}", options.heading(2), title));
    paragraphs.push(
        entries
            .iter()
            .map(|entry| format!("- {}", inline_entry(entry)))
            .collect::<Vec<_>>()
            .join("\n"),
    );
}
