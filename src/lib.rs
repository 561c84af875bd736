//! Sarcery Library
//!
//! A Rust library for turning the plain-text output of `sar` (the sysstat
//! system activity reporter) into structured, column-oriented tables and
//! summary statistics.
//!
//! This library provides tools for:
//! - Parsing multi-section sar text, merging continuation blocks of the same header
//! - Pivoting per-identifier rows (per-CPU, per-device) into one column per identifier
//! - Selecting fields by substring and computing averages, maximums and minimums
//! - A thin CLI that wires the pipeline to files, stdin and JSON/human output
//!
//! ## Pipeline
//!
//! ```rust
//! use sarcery::app::services::{field_aggregator, identifier_pivot, sar_parser};
//!
//! # fn example() -> sarcery::Result<()> {
//! let lines = [
//!     "12:00:02 AM     CPU      %usr     %nice",
//!     "12:10:02 AM     all      1.47      0.00",
//!     "12:10:02 AM       0      0.34      0.00",
//! ];
//! let tables = sar_parser::parse(lines)?;
//! let cpu = identifier_pivot::separate_by_identifier(&tables[0], "CPU")?;
//! let report = field_aggregator::isolate_desired_fields(&[cpu], &["%usr"])?;
//! assert_eq!(report.averages["all::%usr"], 1.47);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_aggregator;
        pub mod identifier_pivot;
        pub mod sar_parser;
        pub mod sar_processor;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CellValue, Number, Table, ValueKind};
pub use app::services::field_aggregator::{AggregateReport, Extreme, isolate_desired_fields};
pub use app::services::identifier_pivot::separate_by_identifier;
pub use app::services::sar_parser::parse;
pub use config::Config;

/// Result type alias for sarcery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sar parsing, pivoting and aggregation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A data row does not carry one value per schema field
    #[error("Malformed row at line {line}: expected {expected} values, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A data row appeared before any header it could belong to
    #[error("Data row at line {line} has no preceding header")]
    UnknownHeader { line: usize },

    /// Column missing, or not usable for the requested operation
    #[error("Invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    /// A column holds both numeric and textual cells
    #[error("Type mismatch in column '{column}' at line {line}: expected {expected}, found '{found}'")]
    TypeMismatch {
        column: String,
        line: usize,
        expected: ValueKind,
        found: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Report or table serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create a malformed row error
    pub fn malformed_row(line: usize, expected: usize, found: usize) -> Self {
        Self::MalformedRow {
            line,
            expected,
            found,
        }
    }

    /// Create an unknown header error
    pub fn unknown_header(line: usize) -> Self {
        Self::UnknownHeader { line }
    }

    /// Create an invalid column error
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        column: impl Into<String>,
        line: usize,
        expected: ValueKind,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            line,
            expected,
            found: found.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether the error comes from the input text rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRow { .. } | Self::UnknownHeader { .. } | Self::TypeMismatch { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {}", error),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML: {}", error),
        }
    }
}
