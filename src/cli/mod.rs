//! Command-line interface of the documentation generator.
//!
//! Flags override the layered [`DocgenConfig`]. [`run`] takes the loader and
//! the output writer as arguments, so tests can serve fixture classes and
//! capture the generated document.

pub mod formatting;

use std::{io::Write, path::PathBuf};

use clap::{ArgGroup, Parser};
use tracing::debug;

use crate::{
    Result,
    config::DocgenConfig,
    docs::{DocsGenerator, MAX_HEADING_OFFSET, OutputFormat},
    loader::{ChainedLoader, SchemaFileLoader, SettingsLoader, SettingsRegistry},
};

/// Class path under which the generator documents its own configuration.
pub const SELF_CLASS_PATH: &str = "settings_docgen.config.DocgenConfig";

/// Generate environment variable documentation from settings classes
#[derive(Parser, Debug)]
#[command(name = "settings-docgen")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["class", "module"])))]
pub struct Cli {
    /// Settings class to document, as a dotted path (repeatable)
    #[arg(long = "class", value_name = "PATH")]
    pub class: Vec<String>,

    /// Module whose settings classes are all documented (repeatable)
    #[arg(long = "module", value_name = "PATH")]
    pub module: Vec<String>,

    /// Output format: markdown, markdown-table or dotenv
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Extra levels added to every Markdown heading (0 to 4)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_HEADING_OFFSET)))]
    pub heading_offset: Option<u8>,

    /// Directory searched for schema documents (repeatable)
    #[arg(short = 'I', long = "search-path", value_name = "DIR")]
    pub search_path: Vec<PathBuf>,

    /// Use specific config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Search directories from the command line, else from the configuration.
    pub fn search_paths(&self, config: &DocgenConfig) -> Vec<PathBuf> {
        if self.search_path.is_empty() {
            config.search_paths.clone()
        } else {
            self.search_path.clone()
        }
    }
}

/// The loader used by the binary: the built-in registry, then schema files.
pub fn default_loader(search_paths: Vec<PathBuf>) -> ChainedLoader {
    ChainedLoader::new()
        .with_loader(SettingsRegistry::new().register::<DocgenConfig>(SELF_CLASS_PATH))
        .with_loader(SchemaFileLoader::new(search_paths))
}

/// Generates the requested documentation and writes it to `out`.
///
/// # Errors
///
/// Returns an error if the configuration is out of range, the output format
/// is unknown, a class or module cannot be resolved, or writing to `out` fails.
pub fn run(
    cli: &Cli,
    config: &DocgenConfig,
    loader: &dyn SettingsLoader,
    out: &mut impl Write,
) -> Result<()> {
    let format = match cli.output_format.as_deref() {
        Some(requested) => requested.parse::<OutputFormat>()?,
        None => config.output_format,
    };
    config.validate()?;
    let heading_offset = cli
        .heading_offset
        .map_or(config.heading_offset, usize::from);
    debug!(%format, heading_offset, "generating documentation");

    let output = DocsGenerator::new(loader)
        .with_format(format)
        .with_heading_offset(heading_offset)
        .generate(&cli.class, &cli.module)?;

    out.write_all(output.as_bytes())?;
    out.flush()?;
    Ok(())
}
