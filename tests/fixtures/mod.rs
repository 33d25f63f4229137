//! Settings types shared by the integration tests.
//!
//! Each type derives `JsonSchema`; `settings_config` and the documentation
//! keywords are attached with `#[schemars(extend(...))]`.

#![allow(dead_code)]

use schemars::JsonSchema;
use serde::Serialize;

pub const SETTINGS_ATTR: &str = "logging_level";
pub const SETTINGS_MARKDOWN_FIRST_LINE: &str = "# `logging_level`\n";

fn some_value() -> String {
    "some_value".to_string()
}

#[derive(Serialize, JsonSchema)]
#[schemars(title = "Empty")]
#[schemars(extend("settings_config" = {}))]
pub struct EmptySettings {
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(title = "Full")]
#[schemars(extend("settings_config" = {}))]
pub struct FullSettings {
    /// use FullSettings like this
    #[serde(default = "some_value")]
    #[schemars(extend("example" = "this is an example use"))]
    #[schemars(extend("possible_values" = ["aaa", "bbb"]))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(title = "Required")]
#[schemars(extend("settings_config" = {}))]
pub struct RequiredSettings {
    /// RequiredSettings
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct MultipleSettings {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "PREFIX_"}))]
pub struct EnvPrefixSettings {
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
pub struct DeepSubModel {
    pub leaf: String,
}

#[derive(Serialize, JsonSchema)]
pub struct SubModel {
    pub nested: String,
    pub deep: DeepSubModel,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_nested_delimiter": "__"}))]
pub struct EnvNestedDelimiterSettings {
    pub direct: String,
    pub sub_model: SubModel,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "PREFIX_", "env_nested_delimiter": "__"}))]
pub struct EnvPrefixAndNestedDelimiterSettings {
    pub direct: String,
    pub sub_model: SubModel,
}

/// Same shape as [`EnvNestedDelimiterSettings`] without a delimiter.
#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct SubModelWithoutDelimiterSettings {
    pub direct: String,
    pub sub_model: SubModel,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct LeafSettings {
    pub leaf: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct SettingsWithSettingsSubModelNoPrefixOrDelimiter {
    pub sub_model: LeafSettings,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "CHILD_"}))]
pub struct PrefixedLeafSettings {
    pub leaf: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "PARENT_", "env_nested_delimiter": "__"}))]
pub struct SettingsWithPrefixedSettingsSubModel {
    pub direct: String,
    pub sub_model: PrefixedLeafSettings,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct PossibleValuesPairSettings {
    #[schemars(extend("possible_values" = [["debug", "Debug level"], ["info", "Info level"]]))]
    #[schemars(extend("examples" = [["debug", "Debug level"], ["info", "Info level"]]))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct PossibleValuesFlatSettings {
    #[schemars(extend("possible_values" = ["debug", "info"]))]
    #[schemars(extend("examples" = ["debug", "info"]))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct PossibleValuesSingleSettings {
    #[schemars(extend("possible_values" = [["debug"], ["info"]]))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {"env_prefix": "PREFIX_"}))]
pub struct AliasNameSettings {
    #[schemars(extend("validation_alias" = "ALIAS"))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct AliasPathSettings {
    #[schemars(extend("validation_alias" = ["first", "second", 0]))]
    pub logging_level: String,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct AliasChoicesSettings {
    #[schemars(extend("validation_alias" = {"choices": ["primary", ["secondary", "inner"]]}))]
    pub logging_level: String,
}

/// Verbosity of the service.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Everything
    Debug,
    /// Normal operation
    Info,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct EnumSettings {
    pub logging_level: Level,
}

#[derive(Serialize, JsonSchema)]
pub struct Node {
    pub name: String,
    pub next: Option<Box<Node>>,
}

#[derive(Serialize, JsonSchema)]
#[schemars(extend("settings_config" = {}))]
pub struct RecursiveTreeSettings {
    pub direct: String,
    pub tree: Option<Node>,
}
