//! Aggregate report structures
//!
//! This module provides the serializable result of a field aggregation:
//! averages plus the extreme rows of every selected column.

use crate::app::models::{CellValue, Number};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A measurement together with the timestamp of the row it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    pub measurement: Number,
    pub timestamp: CellValue,
}

impl Extreme {
    pub fn new(measurement: impl Into<Number>, timestamp: impl Into<CellValue>) -> Self {
        Self {
            measurement: measurement.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Summary statistics for every selected column, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Arithmetic mean of every value in the column
    pub averages: IndexMap<String, f64>,

    /// Largest value and its timestamp (first occurrence on ties)
    pub maximums: IndexMap<String, Extreme>,

    /// Smallest value and its timestamp (first occurrence on ties)
    pub minimums: IndexMap<String, Extreme>,

    /// Value sar printed on the column's single `Average:` row, when there is one
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub reported_averages: IndexMap<String, Number>,
}

/// Borrowed view of one column's statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary<'a> {
    pub column: &'a str,
    pub average: f64,
    pub maximum: &'a Extreme,
    pub minimum: &'a Extreme,
    pub reported_average: Option<Number>,
}

impl AggregateReport {
    /// Empty report, before any column is aggregated
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregated column names, in selection order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.averages.keys().map(String::as_str)
    }

    /// Number of aggregated columns
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    /// Whether no column was aggregated
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// All statistics of one column, if it was aggregated
    pub fn summary(&self, column: &str) -> Option<ColumnSummary<'_>> {
        let (column, average) = self.averages.get_key_value(column)?;
        Some(ColumnSummary {
            column,
            average: *average,
            maximum: self.maximums.get(column)?,
            minimum: self.minimums.get(column)?,
            reported_average: self.reported_averages.get(column).copied(),
        })
    }

    /// Summaries of every aggregated column, in selection order
    pub fn summaries(&self) -> impl Iterator<Item = ColumnSummary<'_>> {
        self.columns().filter_map(|column| self.summary(column))
    }
}
