//! CLI, configuration and commands
//!
//! This crate provides the `ical2po` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::ConverterConfig;
pub use error::{CliError, CliResult};
