//! Application constants for sarcery
//!
//! Column names, line markers and default values shared by the parser,
//! the pivot, the aggregator and the CLI.

// =============================================================================
// Table Layout
// =============================================================================

/// Name of the column holding each row's leading stamp (time of day or `Average:`)
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Separator between identifier value and field name in pivoted column names
pub const IDENTIFIER_SEPARATOR: &str = "::";

// =============================================================================
// Line Markers
// =============================================================================

/// Leading token of sar's per-section summary rows
pub const AVERAGE_LABEL: &str = "Average:";

/// 12-hour clock markers that may follow a time-of-day token
pub const MERIDIEM_MARKERS: &[&str] = &["AM", "PM"];

/// Body tokens sar prints when the reporting host rebooted mid-file
pub const RESTART_MARKER: &[&str] = &["LINUX", "RESTART"];

/// Accepted shape of a time-of-day token, validated further with chrono
pub const TIME_OF_DAY_PATTERN: &str = r"^\d{1,2}:\d{2}:\d{2}$";

// =============================================================================
// Defaults
// =============================================================================

/// Fields summarized when neither the CLI nor the config file names any
pub const DEFAULT_FIELD_PATTERNS: &[&str] = &[
    "%usr", "%nice", "%sys", "%iowait", "%idle", "%commit", "kbcommit",
];

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sarcery.toml";

/// Decimal places used by the human-readable report
pub const DEFAULT_REPORT_PRECISION: usize = 2;

/// Log target used by the CLI's default filter
pub const LOG_TARGET: &str = "sarcery";
