//! Field aggregation across parsed sar tables
//!
//! Given tables (usually already pivoted) and a list of field-name substrings,
//! this module selects matching columns and reports their average, maximum
//! and minimum, the extremes together with the timestamp of their row.
//!
//! - [`aggregator`] - Column selection, cross-table merging and statistics
//! - [`report`] - Serializable report structures
//!
//! ```rust
//! use sarcery::{CellValue, Table};
//! use sarcery::app::services::field_aggregator::isolate_desired_fields;
//!
//! # fn example() -> sarcery::Result<()> {
//! let table: Table = [
//!     ("timestamp", vec![CellValue::from("12:10:02 AM"), CellValue::from("12:20:01 AM")]),
//!     ("0::%usr", vec![CellValue::from(0.34), CellValue::from(0.43)]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = isolate_desired_fields(&[table], &["%usr"])?;
//! assert_eq!(report.maximums["0::%usr"].timestamp, CellValue::from("12:20:01 AM"));
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod report;

#[cfg(test)]
mod tests;

pub use aggregator::{is_explicit_request, isolate_desired_fields, matches_any};
pub use report::{AggregateReport, ColumnSummary, Extreme};
