//! Runs the CLI against a registry serving one fixture as `MockedClass`.

#![allow(dead_code, clippy::unwrap_used)]

use clap::Parser;
use schemars::JsonSchema;
use settings_docgen::{
    Result,
    cli::{Cli, run},
    config::DocgenConfig,
    loader::SettingsRegistry,
};

pub const MOCKED_CLASS: &str = "MockedClass";

/// Generates documentation for `T` and returns stdout, lowercased.
///
/// The base arguments select `MockedClass`, in Markdown unless `args` name
/// another format; `args` are appended.
pub fn run_app_with_settings<T: JsonSchema>(args: &[&str]) -> String {
    try_run_app_with_settings::<T>(args).unwrap().to_lowercase()
}

/// Like [`run_app_with_settings`] but keeps the error and the original case.
pub fn try_run_app_with_settings<T: JsonSchema>(args: &[&str]) -> Result<String> {
    let mut argv = vec!["settings-docgen", "--class", MOCKED_CLASS];
    if !args.contains(&"--output-format") {
        argv.extend(["--output-format", "markdown"]);
    }
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv).unwrap();
    let registry = SettingsRegistry::new().register::<T>(MOCKED_CLASS);

    let mut out = Vec::new();
    run(&cli, &DocgenConfig::default(), &registry, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}
