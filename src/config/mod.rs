//! Configuration system for formnest.
//!
//! This module provides the configuration structure for formnest with sensible defaults
//! and support for serialization/deserialization via serde. Configuration can be loaded
//! from TOML files and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use formnest::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Json);
//! assert_eq!(config.indent_size, 2);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Yaml,
//!     drop_empty_values: true,
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output encoding for serialized results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("Unknown output format '{}'", other)),
        }
    }
}

/// Configuration for the formnest application.
///
/// All fields have sensible defaults via `Config::default()`.
///
/// # Fields
///
/// * `output_format` - Encoding of the result: "json" or "yaml" (default: "json")
/// * `indent_size` - Spaces per indentation level in JSON output (default: 2)
/// * `drop_empty_values` - Skip fields whose normalized value is empty (default: false)
/// * `digit_group_classes` - Classes that strip digit-group commas (default: format-float, format-miles)
/// * `date_classes` - Classes that reformat day-first dates (default: format-date)
/// * `create_backup` - Create .bak files before overwriting output (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Encoding of the result
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Skip fields with empty values
    #[serde(default)]
    pub drop_empty_values: bool,

    /// Classes that trigger digit-group stripping
    #[serde(default = "default_digit_group_classes")]
    pub digit_group_classes: Vec<String>,

    /// Classes that trigger date reformatting
    #[serde(default = "default_date_classes")]
    pub date_classes: Vec<String>,

    /// Create .bak files before overwriting output
    #[serde(default)]
    pub create_backup: bool,
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

/// Returns the default digit-group classes.
fn default_digit_group_classes() -> Vec<String> {
    vec!["format-float".to_string(), "format-miles".to_string()]
}

/// Returns the default date classes.
fn default_date_classes() -> Vec<String> {
    vec!["format-date".to_string()]
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `output_format`: json
    /// * `indent_size`: 2
    /// * `drop_empty_values`: false
    /// * `digit_group_classes`: ["format-float", "format-miles"]
    /// * `date_classes`: ["format-date"]
    /// * `create_backup`: false
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            indent_size: default_indent_size(),
            drop_empty_values: false,
            digit_group_classes: default_digit_group_classes(),
            date_classes: default_date_classes(),
            create_backup: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/formnest/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("formnest");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// Falls back to defaults when the file is missing or malformed; a
    /// malformed file is reported as a warning.
    pub fn load_from<P: AsRef<std::path::Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), "ignoring malformed config: {}", err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
