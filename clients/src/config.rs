//! Client configuration read from `ontoval.toml`.
//!
//! ```toml
//! [validation]
//! parallel = true
//!
//! [report]
//! format = "json"
//!
//! [logging]
//! filter = "ontoval_validator=debug"
//! ```
//!
//! Every section and key is optional. Command-line flags override the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ontoval_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "ontoval.toml";

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per diagnostic.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// `[report]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: ReportFormat,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `[validation]` section.
    pub validation: ValidatorConfig,
    /// `[report]` section.
    pub report: ReportConfig,
    /// `[logging]` section.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads `path` if given, else [`CONFIG_FILE`] if it exists, else the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be loaded.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }
}
