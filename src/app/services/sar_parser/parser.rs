//! Core sar section parser
//!
//! This module turns a sequence of lines into one [`Table`] per distinct header
//! schema. Repeated headers reopen their table (continuation blocks), blank
//! lines close the active section, and `Average:` rows are held back so they
//! always land after the timed rows of their table. Column kinds are settled
//! once a table is complete.

use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::HashSet;
use tracing::{debug, info, trace};

use super::line_kind::{LineKind, Stamp, classify_line};
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::infer_cell;
use crate::app::models::{CellValue, Number, Table, ValueKind};
use crate::constants::TIMESTAMP_COLUMN;
use crate::{Error, Result};

/// Parse sar lines into tables, in the order their schema was first seen
pub fn parse<I, S>(lines: I) -> Result<Vec<Table>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with_stats(lines).map(|result| result.tables)
}

/// Parse sar lines and report what was seen along the way
pub fn parse_with_stats<I, S>(lines: I) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sections: IndexMap<Vec<String>, SectionBuilder> = IndexMap::new();
    let mut active: Option<usize> = None;
    let mut stats = ParseStats::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        stats.total_lines += 1;

        match classify_line(line.as_ref()) {
            LineKind::Blank => {
                stats.blank_lines += 1;
                active = None;
            }
            LineKind::Banner => {
                stats.banner_lines += 1;
                trace!("Skipping line {}: {}", line_number, line.as_ref().trim());
            }
            LineKind::Header { stamp, fields } => {
                stats.header_lines += 1;
                let schema: Vec<String> = fields.iter().map(|field| field.to_string()).collect();

                let position = match sections.entry(schema) {
                    Entry::Occupied(entry) => {
                        stats.continuation_headers += 1;
                        debug!(
                            "Line {}: continuing table {} ({} header)",
                            line_number,
                            entry.index(),
                            if stamp.is_average() { "average" } else { "timed" }
                        );
                        entry.index()
                    }
                    Entry::Vacant(entry) => {
                        debug!(
                            "Line {}: new table {} with fields {:?}",
                            line_number,
                            entry.index(),
                            entry.key()
                        );
                        let section = SectionBuilder::new(entry.key());
                        let position = entry.index();
                        entry.insert(section);
                        position
                    }
                };
                active = Some(position);
            }
            LineKind::Data { stamp, values } => {
                active_section(&mut sections, active, line_number)?.append(
                    &stamp,
                    &values,
                    line_number,
                )?;
                stats.data_rows += 1;
            }
            LineKind::Average { values } => {
                active_section(&mut sections, active, line_number)?.append(
                    &Stamp::Average,
                    &values,
                    line_number,
                )?;
                stats.average_rows += 1;
            }
        }
    }

    let tables: Vec<Table> = sections
        .into_values()
        .map(SectionBuilder::finish)
        .collect::<Result<_>>()?;
    stats.tables = tables.len();

    info!("Parsed sar content: {}", stats.summary());

    Ok(ParseResult { tables, stats })
}

/// Look up the section that the current data row belongs to
fn active_section<'s>(
    sections: &'s mut IndexMap<Vec<String>, SectionBuilder>,
    active: Option<usize>,
    line_number: usize,
) -> Result<&'s mut SectionBuilder> {
    active
        .and_then(|position| sections.get_index_mut(position))
        .map(|(_, section)| section)
        .ok_or_else(|| Error::unknown_header(line_number))
}

/// Rows accumulated for one schema
struct SectionBuilder {
    fields: Vec<String>,
    rows: Vec<RawRow>,
    averages: Vec<RawRow>,
}

/// One data or `Average:` row, tokens kept until the section is finished
struct RawRow {
    stamp: CellValue,
    tokens: Vec<String>,
    line_number: usize,
}

impl SectionBuilder {
    fn new(fields: &[String]) -> Self {
        Self {
            fields: fields.to_vec(),
            rows: Vec::new(),
            averages: Vec::new(),
        }
    }

    fn append(&mut self, stamp: &Stamp, values: &[&str], line_number: usize) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(Error::malformed_row(
                line_number,
                self.fields.len(),
                values.len(),
            ));
        }

        let row = RawRow {
            stamp: stamp.to_cell(),
            tokens: values.iter().map(|token| token.to_string()).collect(),
            line_number,
        };
        if stamp.is_average() {
            self.averages.push(row);
        } else {
            self.rows.push(row);
        }
        Ok(())
    }

    /// Build the table, typing each column by its first cell
    ///
    /// The leading field keeps its tokens verbatim when it names sub-entities,
    /// so CPU numbers `0` and `1` stay labels. Every other column must hold a
    /// single kind throughout.
    fn finish(self) -> Result<Table> {
        let mut rows = self.rows;
        rows.extend(self.averages);

        let mut table = Table::new();
        table.insert_column(
            TIMESTAMP_COLUMN,
            rows.iter().map(|row| row.stamp.clone()).collect(),
        );

        let labelled = leads_with_identifier(&rows);
        for (position, name) in self.fields.into_iter().enumerate() {
            let values: Vec<CellValue> = if position == 0 && labelled {
                rows.iter()
                    .map(|row| CellValue::Text(row.tokens[position].clone()))
                    .collect()
            } else {
                typed_column(&name, position, &rows)?
            };
            table.insert_column(name, values);
        }

        Ok(table)
    }
}

/// Infer every cell of one column, rejecting a change of kind
fn typed_column(name: &str, position: usize, rows: &[RawRow]) -> Result<Vec<CellValue>> {
    let mut kind: Option<ValueKind> = None;
    rows.iter()
        .map(|row| {
            let token = row.tokens[position].as_str();
            let cell = infer_cell(token);
            match kind {
                None => kind = Some(cell.kind()),
                Some(expected) if expected != cell.kind() => {
                    return Err(Error::type_mismatch(name, row.line_number, expected, token));
                }
                Some(_) => {}
            }
            Ok(cell)
        })
        .collect()
}

/// Whether the first field names sub-entities such as `CPU` or `IFACE`
///
/// A leading label like `all` or `eth0` settles it. Otherwise whole-number
/// tokens count as identifiers when an interval lists several distinct ones
/// and the same numbers recur across intervals (`sar -P 0,1`).
fn leads_with_identifier(rows: &[RawRow]) -> bool {
    let labels: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.tokens.first().map(String::as_str))
        .collect();
    let Some(first) = labels.first() else {
        return false;
    };
    if !infer_cell(first).is_numeric() {
        return true;
    }
    if !labels
        .iter()
        .all(|label| matches!(infer_cell(label), CellValue::Number(Number::Int(_))))
    {
        return false;
    }

    let mut per_interval: IndexMap<String, HashSet<&str>> = IndexMap::new();
    for (row, label) in rows.iter().zip(&labels) {
        let seen = per_interval.entry(row.stamp.to_string()).or_default();
        if !seen.insert(*label) {
            return false;
        }
    }

    let distinct: HashSet<&str> = labels.iter().copied().collect();
    per_interval.values().any(|seen| seen.len() > 1) && distinct.len() < labels.len()
}
