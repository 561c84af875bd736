//! Section parser for sar text output
//!
//! This module turns the human-formatted output of `sar` into column-oriented
//! [`Table`](crate::app::models::Table)s, one per distinct header schema.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tokenizer`] - Whitespace splitting, cell-value inference, time-of-day detection
//! - [`line_kind`] - Classification of each line as blank, banner, header, data or average row
//! - [`parser`] - Section routing, continuation merging and table assembly
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use sarcery::app::services::sar_parser;
//!
//! # fn example() -> sarcery::Result<()> {
//! let content = "12:00:02 AM %commit  kbcommit\n\
//!                12:10:02 AM   11.11    111100\n\
//!                Average:      11.11    111100\n";
//! let result = sar_parser::parse_with_stats(content.lines())?;
//!
//! assert_eq!(result.tables.len(), 1);
//! assert_eq!(result.stats.average_rows, 1);
//! # Ok(())
//! # }
//! ```

pub mod line_kind;
pub mod parser;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use line_kind::{LineKind, Stamp, classify_line};
pub use parser::{parse, parse_with_stats};
pub use stats::{ParseResult, ParseStats};
