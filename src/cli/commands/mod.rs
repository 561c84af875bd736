//! Command implementations for the sarcery CLI
//!
//! Each subcommand lives in its own module:
//! - `summarize`: field averages and extremes
//! - `tables`: parsed and pivoted tables

pub mod shared;
pub mod summarize;
pub mod tables;

use crate::app::services::sar_parser::ParseStats;
use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the subcommand handler, returning the parse statistics
pub fn run(args: Args) -> Result<ParseStats> {
    match args.command {
        Some(Commands::Summarize(summarize_args)) => summarize::run_summarize(summarize_args),
        Some(Commands::Tables(tables_args)) => tables::run_tables(tables_args),
        None => Err(Error::configuration("No command specified")),
    }
}
