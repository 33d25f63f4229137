//! Unit tests for config module
//!
//! Tests defaults, TOML layering and environment overrides. Files live in
//! temporary directories; the process environment is never read.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::DocgenError;
use crate::config::{ConfigLayer, DocgenConfig, LogLevel};
use crate::docs::OutputFormat;

fn no_env() -> Vec<(String, String)> {
    Vec::new()
}

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn config_default() {
    let config = DocgenConfig::default();

    assert_eq!(config.output_format, OutputFormat::Markdown);
    assert_eq!(config.heading_offset, 0);
    assert_eq!(config.search_paths, vec![PathBuf::from(".")]);
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        output_format = "markdown-table"
        heading_offset = 1
        search_paths = ["schemas", "vendor"]
        log_level = "debug"
    "#;

    let config: DocgenConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.output_format, OutputFormat::MarkdownTable);
    assert_eq!(config.heading_offset, 1);
    assert_eq!(
        config.search_paths,
        vec![PathBuf::from("schemas"), PathBuf::from("vendor")]
    );
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn config_minimal_toml_uses_defaults() {
    let config: DocgenConfig = toml::from_str("").unwrap();

    assert_eq!(config, DocgenConfig::default());
}

#[test]
fn config_serialize_roundtrip() {
    let original = DocgenConfig {
        output_format: OutputFormat::Dotenv,
        ..DocgenConfig::default()
    };

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: DocgenConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn no_layers_yields_defaults() {
    let config = DocgenConfig::from_layers(&[], no_env()).unwrap();

    assert_eq!(config, DocgenConfig::default());
}

#[test]
fn missing_optional_layer_is_skipped() {
    let dir = TempDir::new().unwrap();
    let layers = [ConfigLayer::optional(dir.path().join("absent.toml"))];

    let config = DocgenConfig::from_layers(&layers, no_env()).unwrap();

    assert_eq!(config, DocgenConfig::default());
}

#[test]
fn missing_required_layer_fails() {
    let dir = TempDir::new().unwrap();
    let layers = [ConfigLayer::required(dir.path().join("absent.toml"))];

    let error = DocgenConfig::from_layers(&layers, no_env()).unwrap_err();

    match error {
        DocgenError::Config(message) => assert!(message.contains("absent.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn later_layers_take_precedence() {
    let dir = TempDir::new().unwrap();
    let user = write(&dir, "user.toml", "heading_offset = 1\nlog_level = \"info\"\n");
    let project = write(&dir, "project.toml", "heading_offset = 2\n");

    let layers = [ConfigLayer::optional(user), ConfigLayer::optional(project)];
    let config = DocgenConfig::from_layers(&layers, no_env()).unwrap();

    assert_eq!(config.heading_offset, 2);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn invalid_toml_reports_path() {
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "broken.toml", "heading_offset = \n");

    let error = DocgenConfig::from_layers(&[ConfigLayer::optional(broken)], no_env()).unwrap_err();

    match error {
        DocgenError::TomlParse(message) => assert!(message.contains("broken.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_value_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "output_format = \"html\"\n");

    let error = DocgenConfig::from_layers(&[ConfigLayer::optional(path)], no_env()).unwrap_err();

    assert!(matches!(error, DocgenError::Config(_)));
}

#[test]
fn environment_overrides_files() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "heading_offset = 1\noutput_format = \"markdown\"\n");

    let config = DocgenConfig::from_layers(
        &[ConfigLayer::optional(path)],
        env(&[
            ("SETTINGS_DOCGEN_HEADING_OFFSET", "3"),
            ("SETTINGS_DOCGEN_OUTPUT_FORMAT", "dotenv"),
        ]),
    )
    .unwrap();

    assert_eq!(config.heading_offset, 3);
    assert_eq!(config.output_format, OutputFormat::Dotenv);
}

#[test]
fn environment_splits_search_paths() {
    let joined = std::env::join_paths(["schemas", "vendor/schemas"]).unwrap();

    let config = DocgenConfig::from_layers(
        &[],
        vec![(
            "SETTINGS_DOCGEN_SEARCH_PATHS".to_string(),
            joined.to_string_lossy().into_owned(),
        )],
    )
    .unwrap();

    assert_eq!(
        config.search_paths,
        vec![PathBuf::from("schemas"), PathBuf::from("vendor/schemas")]
    );
}

#[test]
fn unrelated_environment_is_ignored() {
    let config = DocgenConfig::from_layers(
        &[],
        env(&[
            ("HEADING_OFFSET", "9"),
            ("SETTINGS_DOCGEN_", "x"),
            ("SETTINGS_DOCGEN_LOG", "trace"),
        ]),
    )
    .unwrap();

    assert_eq!(config, DocgenConfig::default());
}

#[test]
fn oversized_heading_offset_is_rejected() {
    let error = DocgenConfig::from_layers(
        &[],
        env(&[("SETTINGS_DOCGEN_HEADING_OFFSET", "1000000000")]),
    )
    .unwrap_err();

    match error {
        DocgenError::Config(message) => assert!(message.contains("heading_offset")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn logging_variables_are_not_config_keys() {
    let overrides = super::loading::env_overrides(env(&[
        ("SETTINGS_DOCGEN_LOG", "trace"),
        ("SETTINGS_DOCGEN_LOG_FORMAT", "json"),
        ("SETTINGS_DOCGEN_LOG_LEVEL", "debug"),
    ]));

    assert_eq!(overrides.len(), 1);
    assert_eq!(
        overrides.get("log_level"),
        Some(&toml::Value::String("debug".to_string()))
    );
}

#[test]
fn output_format_is_case_insensitive() {
    let config = DocgenConfig::from_layers(
        &[],
        env(&[("SETTINGS_DOCGEN_OUTPUT_FORMAT", "MARKDOWN-TABLE")]),
    )
    .unwrap();
    assert_eq!(config.output_format, OutputFormat::MarkdownTable);

    let config: DocgenConfig = toml::from_str("output_format = \"Dotenv\"").unwrap();
    assert_eq!(config.output_format, OutputFormat::Dotenv);
}
