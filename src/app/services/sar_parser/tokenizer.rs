//! Token-level utilities for sar lines
//!
//! This module provides the whitespace splitter, the lexical cell-value
//! inference applied once per token at ingestion time, and the predicates used
//! to recognise the leading time-of-day stamp of a line.

use crate::app::models::{CellValue, Number};
use crate::constants::{MERIDIEM_MARKERS, TIME_OF_DAY_PATTERN};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TIME_OF_DAY_PATTERN).expect("time-of-day pattern is a valid regex")
});

/// Split a raw line into whitespace-delimited tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Infer a cell value from a token's lexical form
///
/// A token containing `.` is a float, an optionally signed run of digits is an
/// int, anything else (including tokens that look numeric but do not parse)
/// stays text.
pub fn infer_cell(token: &str) -> CellValue {
    if token.contains('.') {
        return match token.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number(Number::Float(value)),
            _ => CellValue::Text(token.to_string()),
        };
    }

    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = token.parse::<i64>() {
            return CellValue::Number(Number::Int(value));
        }
    }

    CellValue::Text(token.to_string())
}

/// Whether a token is a wall-clock time such as `12:10:02` or `00:10:01`
pub fn is_time_of_day(token: &str) -> bool {
    TIME_OF_DAY.is_match(token) && NaiveTime::parse_from_str(token, "%H:%M:%S").is_ok()
}

/// Whether a token is a 12-hour clock marker
pub fn is_meridiem(token: &str) -> bool {
    MERIDIEM_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(
            tokenize("12:10:02 AM     all      1.47\t0.00  "),
            vec!["12:10:02", "AM", "all", "1.47", "0.00"]
        );
        assert!(tokenize("   \t ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_infer_float() {
        assert_eq!(infer_cell("1.47"), CellValue::from(1.47));
        assert_eq!(infer_cell("0.00"), CellValue::from(0.0));
        assert_eq!(infer_cell("-3.5"), CellValue::from(-3.5));
    }

    #[test]
    fn test_infer_int() {
        assert_eq!(infer_cell("111100"), CellValue::Number(Number::Int(111100)));
        assert_eq!(infer_cell("0"), CellValue::Number(Number::Int(0)));
        assert_eq!(infer_cell("-7"), CellValue::Number(Number::Int(-7)));
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(infer_cell("all"), CellValue::from("all"));
        assert_eq!(infer_cell("%usr"), CellValue::from("%usr"));
        assert_eq!(infer_cell("eth0"), CellValue::from("eth0"));
        assert_eq!(infer_cell("1.2.3"), CellValue::from("1.2.3"));
        assert_eq!(infer_cell("-"), CellValue::from("-"));
        assert_eq!(infer_cell("Average:"), CellValue::from("Average:"));
    }

    #[test]
    fn test_integer_overflow_stays_text() {
        assert_eq!(
            infer_cell("99999999999999999999"),
            CellValue::from("99999999999999999999")
        );
    }

    #[test]
    fn test_time_of_day() {
        assert!(is_time_of_day("12:10:02"));
        assert!(is_time_of_day("00:00:01"));
        assert!(is_time_of_day("23:59:59"));
        assert!(!is_time_of_day("25:00:00"));
        assert!(!is_time_of_day("12:10"));
        assert!(!is_time_of_day("Average:"));
        assert!(!is_time_of_day("01/02/2020"));
    }

    #[test]
    fn test_meridiem() {
        assert!(is_meridiem("AM"));
        assert!(is_meridiem("pm"));
        assert!(!is_meridiem("CPU"));
    }
}
