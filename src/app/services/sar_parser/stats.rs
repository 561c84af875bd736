//! Parsing statistics and result structures for sar processing
//!
//! This module provides types for tracking what the section parser saw and
//! for returning parsed tables together with those counters.

use crate::app::models::Table;

/// Parsing result with tables and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Tables in the order their schema was first seen
    pub tables: Vec<Table>,

    /// Line and row counters
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines consumed
    pub total_lines: usize,

    /// Lines without tokens
    pub blank_lines: usize,

    /// Preamble, restart notices and other ignored lines
    pub banner_lines: usize,

    /// Header lines, including continuations and `Average:` headers
    pub header_lines: usize,

    /// Header lines that reopened an already known schema
    pub continuation_headers: usize,

    /// Timed data rows appended
    pub data_rows: usize,

    /// `Average:` rows appended
    pub average_rows: usize,

    /// Distinct schemas, one table each
    pub tables: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended to any table
    pub fn total_rows(&self) -> usize {
        self.data_rows + self.average_rows
    }

    /// Percentage of lines that carried table content (headers or rows)
    pub fn content_ratio(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            ((self.header_lines + self.total_rows()) as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines -> {} tables, {} rows ({} averages), {} headers ({} continuations)",
            self.total_lines,
            self.tables,
            self.total_rows(),
            self.average_rows,
            self.header_lines,
            self.continuation_headers
        )
    }
}
