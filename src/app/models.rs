//! Data models for sar processing
//!
//! This module contains the core data structures for representing parsed sar
//! sections: cell values with their inferred numeric or textual kind, and the
//! column-oriented [`Table`] shared by the parser, the pivot and the aggregator.

use crate::constants::TIMESTAMP_COLUMN;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Cell Values
// =============================================================================

/// A numeric measurement, keeping the integer/float distinction of its source token
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to f64 for arithmetic and comparison
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

// Compares by numeric value, so `Int(0) == Float(0.0)`
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Kind of value a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Numeric,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Numeric => f.write_str("numeric"),
            ValueKind::Text => f.write_str("text"),
        }
    }
}

/// One cell of a [`Table`]
///
/// Timestamps and identifiers are text; measurements are numbers. Conversion
/// from `&str` keeps the text verbatim; lexical inference lives in
/// [`crate::app::services::sar_parser::tokenizer::infer_cell`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(Number),
    Text(String),
}

impl CellValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Number(_) => ValueKind::Numeric,
            CellValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            CellValue::Number(number) => Some(*number),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(number) => fmt::Display::fmt(number, f),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<Number> for CellValue {
    fn from(value: Number) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(Number::Int(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(Number::Float(value))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Column-oriented dataset sharing one header schema
///
/// Columns keep insertion order. Equality compares names and values and
/// ignores column order. Serializes as a plain `{column: [values]}` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    columns: IndexMap<String, Vec<CellValue>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns, all empty
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|name| (name.into(), Vec::new()))
                .collect(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The shared row ordinate, if this table has one
    pub fn timestamps(&self) -> Option<&[CellValue]> {
        self.column(TIMESTAMP_COLUMN)
    }

    /// Length of the longest column
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether every column has the same length
    pub fn is_aligned(&self) -> bool {
        let mut lengths = self.columns.values().map(Vec::len);
        match lengths.next() {
            Some(first) => lengths.all(|len| len == first),
            None => true,
        }
    }

    /// Kind of a column: text if any cell is text, `None` for missing or empty columns
    pub fn column_kind(&self, name: &str) -> Option<ValueKind> {
        let values = self.columns.get(name)?;
        if values.is_empty() {
            return None;
        }
        if values.iter().all(CellValue::is_numeric) {
            Some(ValueKind::Numeric)
        } else {
            Some(ValueKind::Text)
        }
    }

    /// Append a value to a column, creating the column on first use
    pub fn push(&mut self, column: &str, value: CellValue) {
        match self.columns.get_mut(column) {
            Some(values) => values.push(value),
            None => {
                self.columns.insert(column.to_string(), vec![value]);
            }
        }
    }

    /// Insert or replace a whole column, returning the previous values
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<CellValue>,
    ) -> Option<Vec<CellValue>> {
        self.columns.insert(name.into(), values)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<CellValue>)> for Table {
    fn from_iter<T: IntoIterator<Item = (S, Vec<CellValue>)>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        }
    }
}
