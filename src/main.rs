//! settings-docgen - documents the environment variables read by settings classes.
//!
//! Loads the layered configuration, resolves the requested classes and
//! writes the rendered document to stdout. Failures are reported on stderr
//! with exit status 1.

use std::{io, process};

use clap::Parser;
use settings_docgen::{
    Result,
    cli::{self, Cli, formatting::error_line},
    config::DocgenConfig,
    tracing_config,
};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{e}");
        eprintln!("{}", error_line(&e.to_string()));
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = DocgenConfig::load(cli.config.as_deref())?;

    if let Err(e) = tracing_config::init(config.log_level) {
        eprintln!("Failed to initialize tracing: {e}");
    }
    info!(classes = ?cli.class, modules = ?cli.module, "starting settings-docgen");

    let loader = cli::default_loader(cli.search_paths(&config));
    let stdout = io::stdout();
    cli::run(cli, &config, &loader, &mut stdout.lock())
}
