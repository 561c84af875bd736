//! Test utilities for field aggregation testing

use crate::app::models::{CellValue, Table};
use crate::constants::TIMESTAMP_COLUMN;


pub const STAMPS: [&str; 5] = [
    "12:10:02 AM",
    "12:20:01 AM",
    "12:30:01 AM",
    "12:40:01 AM",
    "Average:",
];

pub fn text_column(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}

pub fn float_column(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}

pub fn int_column(values: &[i64]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Pivoted CPU and memory-commit columns sharing one timestamp ordinate
pub fn sample_pivoted_table() -> Table {
    [
        (TIMESTAMP_COLUMN, text_column(&STAMPS)),
        ("all::%usr", float_column(&[1.46, 2.01, 1.56, 1.47, 1.69])),
        ("0::%usr", float_column(&[0.34, 0.43, 0.64, 2.48, 1.18])),
        ("1::%usr", float_column(&[0.21, 0.25, 1.62, 0.32, 1.23])),
        ("all::%nice", float_column(&[0.00, 0.01, 0.01, 0.21, 0.11])),
        ("0::%nice", float_column(&[0.01, 0.01, 0.00, 0.71, 0.64])),
        ("1::%nice", float_column(&[0.00, 5.00, 7.00, 9.00, 0.07])),
        ("%commit", float_column(&[11.11, 11.14, 17.11, 33.33, 18.17])),
        (
            "kbcommit",
            int_column(&[111100, 111400, 171100, 333300, 181725]),
        ),
    ]
    .into_iter()
    .collect()
}
