//! ical2po CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use icalpo_cli::cli::{Cli, Command, ConfigAction};
use icalpo_cli::commands;
use icalpo_cli::config::ConverterConfig;
use icalpo_cli::error::{CliError, CliResult};
use icalpo_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ConverterConfig::default_path);
    let config = if cli.config.is_some() {
        ConverterConfig::load_from(&config_path).map_err(CliError::Config)?
    } else {
        ConverterConfig::load().map_err(CliError::Config)?
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match cli.command {
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        None => commands::convert::run(&cli, &config).map(|_| ()),
    }
}
