//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use icalpo_convert::TemplateFormat;
use icalpo_core::{DuplicateStyle, TranslatableField};

/// ical2po - Convert iCalendar files to gettext PO catalogs
#[derive(Debug, Parser)]
#[command(name = "ical2po")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ICALPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    // --- Conversion ---
    /// Calendar to convert ("-" or absent for stdin)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Catalog to write ("-" or absent for stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Source calendar or previous catalog to merge translations from
    #[arg(long, short)]
    pub template: Option<PathBuf>,

    /// Write a template with empty translations
    #[arg(long = "pot", short = 'P')]
    pub pot: bool,

    /// How to keep identical source texts apart: msgctxt, merge or msgid_comment
    #[arg(long = "duplicates", value_name = "STYLE")]
    pub duplicate_style: Option<DuplicateStyle>,

    /// Template format (detected from the content by default)
    #[arg(long, value_name = "ics|po")]
    pub template_format: Option<TemplateFormat>,

    /// Calendar properties to extract, comma separated
    #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
    pub fields: Vec<TranslatableField>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,

    /// Show configuration file path
    Path,
}
