//! Unit tests for settings class loaders

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{fs, path::Path};

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;

use crate::DocgenError;
use crate::loader::{
    ChainedLoader, ClassPath, ResolutionError, SchemaFileLoader, SettingsLoader,
    SettingsRegistry,
};

/// Settings used by the registry tests.
#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "APP_"}))]
struct AppSettings {
    /// Listen port.
    port: u16,
}

#[derive(Serialize, JsonSchema)]
struct OtherSettings {
    name: String,
}

fn write_module(dir: &Path, relative: &str, document: &serde_json::Value) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(document).unwrap()).unwrap();
}

fn app_module() -> serde_json::Value {
    json!({
        "title": "AppSettings",
        "settings_config": {"env_prefix": "APP_"},
        "properties": {
            "port": {"type": "integer", "default": 8080},
            "database": {"$ref": "#/$defs/DatabaseSettings"}
        },
        "$defs": {
            "DatabaseSettings": {
                "settings_config": {"env_prefix": "DB_"},
                "properties": {"url": {"type": "string"}},
                "required": ["url"]
            }
        }
    })
}

#[test]
fn class_path_splits_module_and_class() {
    let path = ClassPath::parse("myapp.settings.AppSettings").unwrap();

    assert_eq!(path.module, "myapp.settings");
    assert_eq!(path.class, "AppSettings");
}

#[test]
fn class_path_requires_module() {
    assert!(matches!(
        ClassPath::parse("AppSettings"),
        Err(ResolutionError::InvalidClassPath(_))
    ));
    assert!(matches!(
        ClassPath::parse("myapp..AppSettings"),
        Err(ResolutionError::InvalidClassPath(_))
    ));
    assert!(matches!(
        ClassPath::parse("my-app.AppSettings"),
        Err(ResolutionError::InvalidClassPath(_))
    ));
}

#[test]
fn registry_resolves_registered_type() {
    let registry = SettingsRegistry::new().register::<AppSettings>("myapp.AppSettings");

    let schema = registry.resolve("myapp.AppSettings").unwrap();

    assert_eq!(schema.name, "AppSettings");
    assert!(schema.is_settings);
    assert_eq!(schema.config.env_prefix.as_deref(), Some("APP_"));
    assert_eq!(schema.fields[0].name, "port");
    assert!(schema.fields[0].required());
}

#[test]
fn registry_reports_unknown_class() {
    let registry = SettingsRegistry::new();

    assert!(matches!(
        registry.resolve("myapp.Missing"),
        Err(DocgenError::Resolution(ResolutionError::ClassNotFound(_)))
    ));
}

#[test]
fn registry_module_lists_direct_children_in_order() {
    let registry = SettingsRegistry::new()
        .register::<OtherSettings>("myapp.OtherSettings")
        .register::<AppSettings>("myapp.AppSettings")
        .register::<AppSettings>("myapp.nested.AppSettings");

    let names: Vec<String> = registry
        .resolve_module("myapp")
        .unwrap()
        .into_iter()
        .map(|schema| schema.name)
        .collect();

    assert_eq!(names, ["OtherSettings", "AppSettings"]);
    assert_eq!(registry.class_paths().count(), 3);
}

#[test]
fn file_loader_resolves_root_and_definitions() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "myapp/settings.json", &app_module());
    let loader = SchemaFileLoader::new(vec![dir.path().to_path_buf()]);

    let root = loader.resolve("myapp.settings.AppSettings").unwrap();
    let nested = loader.resolve("myapp.settings.DatabaseSettings").unwrap();

    assert_eq!(root.fields.len(), 2);
    assert_eq!(nested.config.env_prefix.as_deref(), Some("DB_"));
}

#[test]
fn file_loader_uses_first_search_path_with_module() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_module(second.path(), "settings.json", &app_module());
    let loader = SchemaFileLoader::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    assert_eq!(
        loader.locate_module("settings").unwrap(),
        second.path().join("settings.json")
    );
}

#[test]
fn file_loader_reports_missing_module_and_class() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "settings.json", &app_module());
    let loader = SchemaFileLoader::new(vec![dir.path().to_path_buf()]);

    assert!(matches!(
        loader.resolve("missing.AppSettings"),
        Err(DocgenError::Resolution(ResolutionError::ModuleNotFound { .. }))
    ));
    assert!(matches!(
        loader.resolve("settings.Missing"),
        Err(DocgenError::Resolution(ResolutionError::ClassNotFound(_)))
    ));
}

#[test]
fn file_loader_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let loader = SchemaFileLoader::new(vec![dir.path().to_path_buf()]);

    assert!(matches!(
        loader.resolve("broken.AppSettings"),
        Err(DocgenError::Resolution(ResolutionError::UnreadableModule { .. }))
    ));
}

#[test]
fn file_loader_module_lists_settings_classes() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "myapp/settings.json", &app_module());
    let loader = SchemaFileLoader::new(vec![dir.path().to_path_buf()]);

    let names: Vec<String> = loader
        .resolve_module("myapp.settings")
        .unwrap()
        .into_iter()
        .map(|schema| schema.name)
        .collect();

    assert_eq!(names, ["AppSettings", "DatabaseSettings"]);
}

#[test]
fn file_loader_rejects_module_without_settings() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "empty.json", &json!({"type": "string"}));
    let loader = SchemaFileLoader::new(vec![dir.path().to_path_buf()]);

    assert!(matches!(
        loader.resolve_module("empty"),
        Err(DocgenError::Resolution(ResolutionError::EmptyModule(_)))
    ));
}

#[test]
fn chain_falls_through_not_found() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "myapp/settings.json", &app_module());
    let chain = ChainedLoader::new()
        .with_loader(SettingsRegistry::new().register::<OtherSettings>("builtin.OtherSettings"))
        .with_loader(SchemaFileLoader::new(vec![dir.path().to_path_buf()]));

    assert_eq!(chain.resolve("builtin.OtherSettings").unwrap().name, "OtherSettings");
    assert_eq!(
        chain.resolve("myapp.settings.AppSettings").unwrap().name,
        "AppSettings"
    );
    assert!(matches!(
        chain.resolve("myapp.settings.Missing"),
        Err(DocgenError::Resolution(ResolutionError::ClassNotFound(_)))
    ));
}

#[test]
fn chain_stops_at_invalid_path() {
    let chain = ChainedLoader::new()
        .with_loader(SettingsRegistry::new())
        .with_loader(SchemaFileLoader::new(Vec::new()));

    assert!(matches!(
        chain.resolve("NotDotted"),
        Err(DocgenError::Resolution(ResolutionError::InvalidClassPath(_)))
    ));
}
