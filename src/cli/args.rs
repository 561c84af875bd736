//! Command-line argument definitions for sarcery
//!
//! This module defines the CLI interface using the clap derive API.

pub use crate::config::OutputFormat;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Marker argument meaning "read from standard input"
pub const STDIN_MARKER: &str = "-";

/// CLI arguments for the sar report analyzer
///
/// Parses the text output of `sar` into tables and summarizes selected fields.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sarcery",
    version,
    about = "Parse sar text reports into tables and summarize selected fields",
    long_about = "Parses the plain-text output of sar (sysstat) into column-oriented tables, \
                  pivots per-CPU or per-device rows into one column per entity, and reports \
                  the average, maximum and minimum of the fields you select."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Summarize selected fields: averages, maximums and minimums
    Summarize(SummarizeArgs),
    /// Print the parsed (and pivoted) tables
    Tables(TablesArgs),
}

/// Arguments for the summarize command
#[derive(Debug, Clone, Parser)]
pub struct SummarizeArgs {
    /// sar text file to read, or `-` for standard input
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column naming sub-entities to pivot on (e.g. CPU, IFACE)
    ///
    /// When omitted, text columns are detected per table unless
    /// --no-auto-pivot is given.
    #[arg(
        short = 'i',
        long = "identifier",
        value_name = "COLUMN",
        help = "Identifier column to pivot on"
    )]
    pub identifier: Option<String>,

    /// Field substrings to summarize (comma-separated list)
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "LIST",
        help = "Comma-separated field substrings to summarize",
        long_help = "Comma-separated list of substrings. Every column whose name contains \
                     one of them is summarized, so '%usr' selects 'all::%usr', '0::%usr' and so on.\n\
                     Defaults to %usr,%nice,%sys,%iowait,%idle,%commit,kbcommit"
    )]
    pub fields: Option<FieldList>,

    /// Keep tables in long format unless --identifier is given
    #[arg(long = "no-auto-pivot", help = "Do not detect identifier columns")]
    pub no_auto_pivot: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, ./sarcery.toml is used
    /// when present.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the report
    #[arg(long = "format", value_enum, help = "Output format for the report")]
    pub format: Option<OutputFormat>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the tables command
#[derive(Debug, Clone, Parser)]
pub struct TablesArgs {
    /// sar text file to read, or `-` for standard input
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column naming sub-entities to pivot on (e.g. CPU, IFACE)
    #[arg(
        short = 'i',
        long = "identifier",
        value_name = "COLUMN",
        help = "Identifier column to pivot on"
    )]
    pub identifier: Option<String>,

    /// Keep tables in long format unless --identifier is given
    #[arg(long = "no-auto-pivot", help = "Do not detect identifier columns")]
    pub no_auto_pivot: bool,

    /// Print tables exactly as parsed, without any pivoting
    #[arg(long = "raw", help = "Print tables as parsed, without pivoting")]
    pub raw: bool,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the tables
    #[arg(long = "format", value_enum, help = "Output format for the tables")]
    pub format: Option<OutputFormat>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Wrapper for parsing comma-separated field patterns
#[derive(Debug, Clone, PartialEq)]
pub struct FieldList {
    pub patterns: Vec<String>,
}

impl FromStr for FieldList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let patterns: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if patterns.is_empty() {
            return Err(Error::configuration("Field list cannot be empty"));
        }

        Ok(FieldList { patterns })
    }
}

/// Logging and input options shared by every subcommand
pub trait CommonArgs {
    fn input(&self) -> &Path;
    fn config_file(&self) -> Option<&Path>;
    fn verbose(&self) -> u8;
    fn quiet(&self) -> bool;

    /// Whether the input is standard input rather than a file
    fn reads_stdin(&self) -> bool {
        self.input() == Path::new(STDIN_MARKER)
    }

    /// Determine the appropriate log level based on verbosity flags
    fn get_log_level(&self) -> &'static str {
        if self.quiet() {
            "error"
        } else {
            match self.verbose() {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check that the input file and config file exist
    fn validate_paths(&self) -> Result<()> {
        if !self.reads_stdin() {
            let input = self.input();
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }
            if input.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input.display()
                )));
            }
        }

        if let Some(config_file) = self.config_file() {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }
}

impl CommonArgs for SummarizeArgs {
    fn input(&self) -> &Path {
        &self.input
    }

    fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    fn verbose(&self) -> u8 {
        self.verbose
    }

    fn quiet(&self) -> bool {
        self.quiet
    }
}

impl CommonArgs for TablesArgs {
    fn input(&self) -> &Path {
        &self.input
    }

    fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    fn verbose(&self) -> u8 {
        self.verbose
    }

    fn quiet(&self) -> bool {
        self.quiet
    }
}

impl SummarizeArgs {
    /// Validate the summarize command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.validate_paths()?;

        if let Some(identifier) = &self.identifier {
            if identifier.trim().is_empty() {
                return Err(Error::configuration(
                    "Identifier column name cannot be empty",
                ));
            }
        }

        Ok(())
    }

    /// Field patterns given on the command line, if any
    pub fn field_patterns(&self) -> Option<Vec<String>> {
        self.fields.as_ref().map(|list| list.patterns.clone())
    }
}

impl TablesArgs {
    /// Validate the tables command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.validate_paths()?;

        if self.raw && self.identifier.is_some() {
            return Err(Error::configuration(
                "--raw cannot be combined with --identifier",
            ));
        }

        Ok(())
    }
}
