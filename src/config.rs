//! Configuration management and validation.
//!
//! Provides the analysis settings (identifier column, pivoting, field
//! patterns) and output settings used by the processor and the CLI. Values
//! come from built-in defaults, an optional TOML file, then CLI overrides.

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_FIELD_PATTERNS, DEFAULT_REPORT_PRECISION};
use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// How reports and tables are rendered on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

/// Settings that drive the parse -> pivot -> aggregate pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Column whose values name sub-entities (e.g. `CPU`, `IFACE`)
    ///
    /// When unset and `auto_pivot` is on, the identifier is detected per table.
    pub identifier_column: Option<String>,

    /// Detect and pivot identifier columns when none is named
    pub auto_pivot: bool,

    /// Substrings selecting the columns to aggregate
    pub field_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            identifier_column: None,
            auto_pivot: true,
            field_patterns: DEFAULT_FIELD_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        }
    }
}

impl AnalysisConfig {
    /// Pivot on a fixed identifier column
    pub fn with_identifier(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = Some(column.into());
        self
    }

    /// Replace the field patterns
    pub fn with_field_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Leave tables unpivoted unless an identifier is named
    pub fn without_auto_pivot(mut self) -> Self {
        self.auto_pivot = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(identifier) = &self.identifier_column {
            if identifier.trim().is_empty() {
                return Err(Error::configuration(
                    "Identifier column name cannot be empty",
                ));
            }
        }

        if self.field_patterns.is_empty() {
            return Err(Error::configuration(
                "At least one field pattern is required",
            ));
        }

        if self.field_patterns.iter().any(|pattern| pattern.is_empty()) {
            return Err(Error::configuration("Field patterns cannot be empty"));
        }

        Ok(())
    }
}

/// Rendering settings for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Decimal places for averages in human output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            precision: DEFAULT_REPORT_PRECISION,
        }
    }
}

/// Top-level configuration, as read from `sarcery.toml`
///
/// ```toml
/// [analysis]
/// identifier_column = "CPU"
/// field_patterns = ["%usr", "%idle"]
///
/// [output]
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        let config: Config = toml::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load an explicit file, else `./sarcery.toml` when present, else defaults
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }
}
