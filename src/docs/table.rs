use super::{DocumentedClass, RenderOptions, code, inline_entry};
use crate::resolve::ResolvedField;

const TABLE_HEADER: &str = "| Variable | Type | Required | Default | Description |\n|----------|------|----------|---------|-------------|";

/// Renders a Markdown table documenting the variables of one class.
///
/// The class description, if any, is a paragraph between the heading and the
/// table. Returns an empty string when the class has no fields.
pub fn render_property_table(
    section_title: &str,
    description: Option<&str>,
    fields: &[ResolvedField],
    options: RenderOptions,
) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let rows = fields
        .iter()
        .map(|field| {
            format!(
                "| {} | {} | {} | {} | {} |",
                code(&field.env_name),
                code(&field.type_name),
                if field.required { "yes" } else { "no" },
                field.default.as_deref().map_or_else(|| "-".to_string(), code),
                description_cell(field)
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    let intro = description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| format!("{text}\n\n"))
        .unwrap_or_default();

    format!(
        "{} {}\n\n{}{}\n{}\n",
        options.heading(1),
        section_title,
        intro,
        TABLE_HEADER,
        rows
    )
}

/// Renders one table per documented class, separated by blank lines.
pub fn render_tables(classes: &[DocumentedClass], options: RenderOptions) -> String {
    classes
        .iter()
        .map(|class| {
            render_property_table(
                &class.title,
                class.description.as_deref(),
                &class.fields,
                options,
            )
        })
        .filter(|table| !table.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn description_cell(field: &ResolvedField) -> String {
    let mut parts = Vec::new();

    if let Some(description) = &field.description {
        parts.push(escape_cell(description.trim()));
    }
    if !field.alternative_env_names.is_empty() {
        let names: Vec<String> = field
            .alternative_env_names
            .iter()
            .map(|name| code(name))
            .collect();
        parts.push(format!("Also read from: {}.", names.join(", ")));
    }
    if !field.possible_values.is_empty() {
        let values: Vec<String> = field
            .possible_values
            .iter()
            .map(|entry| escape_cell(&inline_entry(entry)))
            .collect();
        parts.push(format!("Possible values: {}.", values.join(", ")));
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("<br>")
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}
