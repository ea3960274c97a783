//! Quill Studio CLI.

use clap::{ColorChoice, Parser};
use quill_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::Cli;
use crate::commands::run;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(&cli) {
        tracing::error!(error = %error, "Command failed");
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Explicit level flags switch off `RUST_LOG`; colour follows `--color`,
/// with auto meaning a terminal on stderr and no log file.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit_level.is_none() && !cli.verbosity.is_present(),
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_content: cli.log_content,
        with_ansi,
        ..LogConfig::default()
    }
}
