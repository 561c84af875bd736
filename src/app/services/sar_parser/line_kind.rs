//! Line classification for sar text
//!
//! Every input line maps to exactly one [`LineKind`]. The parser routes on the
//! kind alone, so all knowledge of what a header, a data row or a summary row
//! looks like is kept here.

use super::tokenizer::{infer_cell, is_meridiem, is_time_of_day, tokenize};
use crate::app::models::CellValue;
use crate::constants::{AVERAGE_LABEL, RESTART_MARKER};

/// Leading stamp of a header or data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stamp {
    /// Wall-clock time, verbatim including any AM/PM marker (`"12:10:02 AM"`)
    Time(String),
    /// The `Average:` label of a summary block
    Average,
}

impl Stamp {
    /// Whether this is the `Average:` label rather than a time
    pub fn is_average(&self) -> bool {
        matches!(self, Stamp::Average)
    }

    /// Value stored in the `timestamp` column for rows carrying this stamp
    pub fn to_cell(&self) -> CellValue {
        match self {
            Stamp::Time(time) => CellValue::Text(time.clone()),
            Stamp::Average => CellValue::Text(AVERAGE_LABEL.to_string()),
        }
    }
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// No tokens; ends the active section
    Blank,
    /// Preamble (`Linux 5.4.0 (host) ...`), restart notices and stamp-only lines
    Banner,
    /// Field names following a stamp
    Header { stamp: Stamp, fields: Vec<&'a str> },
    /// Timed data row
    Data { stamp: Stamp, values: Vec<&'a str> },
    /// `Average:` summary row
    Average { values: Vec<&'a str> },
}

/// Classify a raw line
pub fn classify_line(line: &str) -> LineKind<'_> {
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return LineKind::Blank;
    }

    let Some((stamp, body)) = split_stamp(&tokens) else {
        return LineKind::Banner;
    };

    if body.is_empty() || body.starts_with(RESTART_MARKER) {
        return LineKind::Banner;
    }

    let body = body.to_vec();
    if body.iter().all(|token| !infer_cell(token).is_numeric()) {
        return LineKind::Header {
            stamp,
            fields: body,
        };
    }

    if stamp.is_average() {
        LineKind::Average { values: body }
    } else {
        LineKind::Data {
            stamp,
            values: body,
        }
    }
}

/// Separate the leading stamp from the rest of the tokens
fn split_stamp<'t, 'a>(tokens: &'t [&'a str]) -> Option<(Stamp, &'t [&'a str])> {
    let first = *tokens.first()?;

    if first == AVERAGE_LABEL {
        return Some((Stamp::Average, &tokens[1..]));
    }

    if !is_time_of_day(first) {
        return None;
    }

    match tokens.get(1) {
        Some(marker) if is_meridiem(marker) => {
            Some((Stamp::Time(format!("{} {}", first, marker)), &tokens[2..]))
        }
        _ => Some((Stamp::Time(first.to_string()), &tokens[1..])),
    }
}
