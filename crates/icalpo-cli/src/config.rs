//! CLI configuration.
//!
//! Settings live in a single `config.toml` file at
//! `~/.config/icalpo/config.toml` by default. Command-line flags take
//! precedence over every value read here.

use std::path::{Path, PathBuf};

use icalpo_convert::ConvertOptions;
use icalpo_core::{DuplicateStyle, TranslatableField};
use serde::{Deserialize, Serialize};

/// Configuration for the ical2po command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Debug mode.
    pub debug: bool,

    /// Conversion defaults.
    pub convert: ConvertSettings,
}

/// Conversion defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Duplicate style used when `--duplicates` is not given.
    pub duplicate_style: DuplicateStyle,

    /// Always write templates with empty translations.
    pub blank_msgstr: bool,

    /// Extracted properties, in order.
    pub fields: Vec<TranslatableField>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            duplicate_style: DuplicateStyle::default(),
            blank_msgstr: false,
            fields: TranslatableField::ALL.to_vec(),
        }
    }
}

impl ConvertSettings {
    /// Converts to conversion options.
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .with_duplicate_style(self.duplicate_style)
            .with_blank_msgstr(self.blank_msgstr)
            .with_fields(self.fields.clone())
    }
}

impl ConverterConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))?;
        if config.convert.fields.is_empty() {
            return Err("convert.fields must name at least one property".to_string());
        }
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("icalpo")
    }
}
