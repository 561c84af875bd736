//! Identifier-based column pivoting
//!
//! sar prints per-entity sections (per CPU, per interface, per device) in long
//! format: one row per entity per interval, with the entity in an identifier
//! column. This module reshapes such tables into wide format, one column per
//! `(identifier, field)` pair named `"{identifier}::{field}"`.

use crate::app::models::{CellValue, Table, ValueKind};
use crate::constants::{IDENTIFIER_SEPARATOR, TIMESTAMP_COLUMN};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt::Display;
use tracing::debug;

/// Split every non-identifier column into one column per identifier value
///
/// The `timestamp` column is carried through unchanged and the identifier
/// column is dropped. Output columns are created in row-major scan order.
pub fn separate_by_identifier(table: &Table, identifier_column: &str) -> Result<Table> {
    if identifier_column == TIMESTAMP_COLUMN {
        return Err(Error::invalid_column(
            identifier_column,
            "the timestamp ordinate cannot be used as an identifier",
        ));
    }

    let identifiers = table
        .column(identifier_column)
        .ok_or_else(|| Error::invalid_column(identifier_column, "not present in table"))?;

    let value_columns: Vec<(&str, &[CellValue])> = table
        .columns()
        .filter(|(name, _)| *name != identifier_column && *name != TIMESTAMP_COLUMN)
        .collect();

    for (name, values) in &value_columns {
        if values.len() != identifiers.len() {
            return Err(Error::invalid_column(
                *name,
                format!(
                    "has {} rows but identifier column '{}' has {}",
                    values.len(),
                    identifier_column,
                    identifiers.len()
                ),
            ));
        }
    }

    let mut output = Table::new();
    if let Some(timestamps) = table.timestamps() {
        output.insert_column(TIMESTAMP_COLUMN, timestamps.to_vec());
    }

    for (row, identifier) in identifiers.iter().enumerate() {
        for (name, values) in &value_columns {
            output.push(&pivoted_column_name(identifier, name), values[row].clone());
        }
    }

    debug!(
        "Separated {} rows by '{}' into {} columns",
        identifiers.len(),
        identifier_column,
        output.column_count()
    );

    Ok(output)
}

/// Name of the pivoted column holding `column` for one identifier value
pub fn pivoted_column_name(identifier: impl Display, column: &str) -> String {
    format!("{}{}{}", identifier, IDENTIFIER_SEPARATOR, column)
}

/// First non-timestamp column holding text, e.g. `CPU` or `IFACE`
pub fn detect_identifier_column(table: &Table) -> Option<&str> {
    table
        .column_names()
        .filter(|name| *name != TIMESTAMP_COLUMN)
        .find(|name| table.column_kind(name) == Some(ValueKind::Text))
}

/// Drop consecutive repeats from the `timestamp` column
///
/// After pivoting, every interval appears once per identifier. Collapsing
/// leaves one timestamp per interval, which lines up index by index only
/// with identifiers present in every interval.
pub fn collapse_timestamps(table: &Table) -> Table {
    table
        .columns()
        .map(|(name, values)| {
            let mut values = values.to_vec();
            if name == TIMESTAMP_COLUMN {
                values.dedup();
            }
            (name, values)
        })
        .collect()
}

/// Pivot every table that carries an identifier column, leaving the rest untouched
///
/// With `identifier` set, only tables containing that column are pivoted;
/// otherwise each table's identifier is detected. When every identifier is
/// listed in every interval the pivoted table has its timestamps collapsed to
/// one per interval. Otherwise it is split into one table per identifier, each
/// keeping the stamps of its own rows.
pub fn pivot_tables(tables: &[Table], identifier: Option<&str>) -> Result<Vec<Table>> {
    let mut output = Vec::with_capacity(tables.len());
    for table in tables {
        let column = match identifier {
            Some(name) => table.contains_column(name).then_some(name),
            None => detect_identifier_column(table),
        };

        match column {
            Some(column) => output.extend(pivot_on(table, column)?),
            None => output.push(table.clone()),
        }
    }
    Ok(output)
}

fn pivot_on(table: &Table, identifier_column: &str) -> Result<Vec<Table>> {
    let pivoted = separate_by_identifier(table, identifier_column)?;
    let (Some(timestamps), Some(identifiers)) =
        (table.timestamps(), table.column(identifier_column))
    else {
        return Ok(vec![pivoted]);
    };

    if timestamps.len() != identifiers.len() {
        return Err(Error::invalid_column(
            identifier_column,
            format!(
                "has {} rows but {} has {}",
                identifiers.len(),
                TIMESTAMP_COLUMN,
                timestamps.len()
            ),
        ));
    }

    let mut stamps_by_identifier: IndexMap<String, Vec<CellValue>> = IndexMap::new();
    for (identifier, stamp) in identifiers.iter().zip(timestamps) {
        stamps_by_identifier
            .entry(identifier.to_string())
            .or_default()
            .push(stamp.clone());
    }

    let collapsed = collapse_timestamps(&pivoted);
    let intervals = collapsed.timestamps().unwrap_or_default();
    if stamps_by_identifier
        .values()
        .all(|stamps| stamps.as_slice() == intervals)
    {
        return Ok(vec![collapsed]);
    }

    debug!(
        "Identifiers of '{}' do not cover every interval, splitting into {} tables",
        identifier_column,
        stamps_by_identifier.len()
    );

    let fields: Vec<&str> = table
        .column_names()
        .filter(|name| *name != identifier_column && *name != TIMESTAMP_COLUMN)
        .collect();

    Ok(stamps_by_identifier
        .into_iter()
        .map(|(identifier, stamps)| {
            let mut split = Table::new();
            split.insert_column(TIMESTAMP_COLUMN, stamps);
            for field in &fields {
                let name = pivoted_column_name(&identifier, field);
                if let Some(values) = pivoted.column(&name) {
                    split.insert_column(name, values.to_vec());
                }
            }
            split
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::sar_parser;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|value| CellValue::from(*value)).collect()
    }

    fn floats(values: &[f64]) -> Vec<CellValue> {
        values.iter().map(|value| CellValue::from(*value)).collect()
    }

    fn ints(values: &[i64]) -> Vec<CellValue> {
        values.iter().map(|value| CellValue::from(*value)).collect()
    }

    fn cpu_table() -> Table {
        [
            ("CPU", text(&["0", "1", "2", "3", "0", "1", "2", "3"])),
            (
                "%idle",
                floats(&[90.1, 91.2, 93.4, 88.6, 87.1, 88.2, 89.3, 90.4]),
            ),
            ("%user", floats(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.9])),
            (TIMESTAMP_COLUMN, ints(&[1, 2, 3, 4, 5, 6, 7, 8])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_separate_by_identifier_nominal() {
        let expected: Table = [
            ("0::%idle", floats(&[90.1, 87.1])),
            ("1::%idle", floats(&[91.2, 88.2])),
            ("2::%idle", floats(&[93.4, 89.3])),
            ("3::%idle", floats(&[88.6, 90.4])),
            ("0::%user", floats(&[0.0, 4.0])),
            ("1::%user", floats(&[1.0, 5.0])),
            ("2::%user", floats(&[2.0, 6.0])),
            ("3::%user", floats(&[3.0, 7.9])),
            (TIMESTAMP_COLUMN, ints(&[1, 2, 3, 4, 5, 6, 7, 8])),
        ]
        .into_iter()
        .collect();

        assert_eq!(separate_by_identifier(&cpu_table(), "CPU").unwrap(), expected);
    }

    #[test]
    fn test_separate_column_order_follows_scan() {
        let output = separate_by_identifier(&cpu_table(), "CPU").unwrap();
        let names: Vec<&str> = output.column_names().collect();

        assert_eq!(
            &names[..4],
            &[TIMESTAMP_COLUMN, "0::%idle", "0::%user", "1::%idle"]
        );
        assert!(!output.contains_column("CPU"));
    }

    #[test]
    fn test_separate_completeness() {
        let table = cpu_table();
        let output = separate_by_identifier(&table, "CPU").unwrap();

        // 4 identifiers x 2 value columns, plus the timestamp
        assert_eq!(output.column_count(), 4 * 2 + 1);
        for id in ["0", "1", "2", "3"] {
            let rows = table
                .column("CPU")
                .unwrap()
                .iter()
                .filter(|value| value.as_text() == Some(id))
                .count();
            assert_eq!(output.column(&format!("{}::%idle", id)).unwrap().len(), rows);
            assert_eq!(output.column(&format!("{}::%user", id)).unwrap().len(), rows);
        }
    }

    #[test]
    fn test_separate_uneven_identifiers() {
        let table: Table = [
            (TIMESTAMP_COLUMN, text(&["a", "a", "b"])),
            ("IFACE", text(&["eth0", "lo", "eth0"])),
            ("rxpck/s", floats(&[1.0, 2.0, 3.0])),
        ]
        .into_iter()
        .collect();

        let output = separate_by_identifier(&table, "IFACE").unwrap();
        assert_eq!(output.column("eth0::rxpck/s").unwrap(), floats(&[1.0, 3.0]).as_slice());
        assert_eq!(output.column("lo::rxpck/s").unwrap(), floats(&[2.0]).as_slice());
        assert_eq!(output.timestamps().unwrap(), text(&["a", "a", "b"]).as_slice());
    }

    #[test]
    fn test_separate_missing_identifier() {
        match separate_by_identifier(&cpu_table(), "IFACE") {
            Err(Error::InvalidColumn { column, .. }) => assert_eq!(column, "IFACE"),
            other => panic!("expected InvalidColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_separate_by_timestamp_is_rejected() {
        assert!(matches!(
            separate_by_identifier(&cpu_table(), TIMESTAMP_COLUMN),
            Err(Error::InvalidColumn { .. })
        ));
    }

    #[test]
    fn test_separate_ragged_table_is_rejected() {
        let table: Table = [
            ("CPU", text(&["0", "1"])),
            ("%idle", floats(&[90.1])),
        ]
        .into_iter()
        .collect();

        match separate_by_identifier(&table, "CPU") {
            Err(Error::InvalidColumn { column, .. }) => assert_eq!(column, "%idle"),
            other => panic!("expected InvalidColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_identifiers_render_plainly() {
        let table: Table = [
            ("CPU", ints(&[0, 1])),
            ("%idle", floats(&[90.1, 91.2])),
        ]
        .into_iter()
        .collect();

        let output = separate_by_identifier(&table, "CPU").unwrap();
        assert!(output.contains_column("0::%idle"));
        assert!(output.contains_column("1::%idle"));
    }

    #[test]
    fn test_detect_identifier_column() {
        assert_eq!(detect_identifier_column(&cpu_table()), Some("CPU"));

        let numeric: Table = [
            (TIMESTAMP_COLUMN, text(&["12:10:02 AM"])),
            ("%commit", floats(&[11.11])),
        ]
        .into_iter()
        .collect();
        assert_eq!(detect_identifier_column(&numeric), None);
    }

    #[test]
    fn test_collapse_timestamps() {
        let table: Table = [
            (TIMESTAMP_COLUMN, text(&["a", "a", "b", "b", "a"])),
            ("x", floats(&[1.0, 2.0])),
        ]
        .into_iter()
        .collect();

        let collapsed = collapse_timestamps(&table);
        assert_eq!(collapsed.timestamps().unwrap(), text(&["a", "b", "a"]).as_slice());
        assert_eq!(collapsed.column("x").unwrap(), floats(&[1.0, 2.0]).as_slice());
    }

    #[test]
    fn test_pivot_tables_matches_parsed_sample() {
        let content = "Linux someversion blah blah

12:00:02 AM     CPU      %usr     %nice
12:10:02 AM     all      1.47      0.00
12:10:02 AM       0      0.34      0.00
12:10:02 AM       1      0.21      0.00
12:20:01 AM     all      2.01      0.00
12:20:01 AM       0      0.43      0.00
12:20:01 AM       1      0.25      5.00
12:30:01 AM     all      1.56      0.00
12:30:01 AM       0      0.64      0.00
12:30:01 AM       1      1.62      7.00
12:40:01 AM     all      1.47      0.21
12:40:01 AM       0      2.48      0.71
12:40:01 AM       1      0.32      9.00

Average:        CPU      %usr     %nice
Average:        all      1.19      0.11
Average:          0      1.18      0.64
Average:          1      1.23      0.07

12:00:02 AM %commit  kbcommit
12:10:02 AM   11.11    111100
12:20:01 AM   11.14    111400
12:30:01 AM   17.11    171100
12:40:01 AM   33.33    333300
Average:      18.17    181725
";
        let tables = sar_parser::parse(content.lines()).unwrap();
        let pivoted = pivot_tables(&tables, None).unwrap();
        let stamps = text(&[
            "12:10:02 AM",
            "12:20:01 AM",
            "12:30:01 AM",
            "12:40:01 AM",
            "Average:",
        ]);

        let cpu: Table = [
            (TIMESTAMP_COLUMN, stamps.clone()),
            ("all::%usr", floats(&[1.47, 2.01, 1.56, 1.47, 1.19])),
            ("0::%usr", floats(&[0.34, 0.43, 0.64, 2.48, 1.18])),
            ("1::%usr", floats(&[0.21, 0.25, 1.62, 0.32, 1.23])),
            ("all::%nice", floats(&[0.00, 0.00, 0.00, 0.21, 0.11])),
            ("0::%nice", floats(&[0.00, 0.00, 0.00, 0.71, 0.64])),
            ("1::%nice", floats(&[0.00, 5.00, 7.00, 9.00, 0.07])),
        ]
        .into_iter()
        .collect();
        let commit: Table = [
            (TIMESTAMP_COLUMN, stamps),
            ("%commit", floats(&[11.11, 11.14, 17.11, 33.33, 18.17])),
            ("kbcommit", ints(&[111100, 111400, 171100, 333300, 181725])),
        ]
        .into_iter()
        .collect();

        assert_eq!(pivoted, vec![cpu, commit]);
    }

    #[test]
    fn test_pivot_tables_with_explicit_identifier_skips_other_tables() {
        let other: Table = [
            (TIMESTAMP_COLUMN, text(&["x"])),
            ("IFACE", text(&["eth0"])),
            ("rxpck/s", floats(&[1.0])),
        ]
        .into_iter()
        .collect();

        let pivoted = pivot_tables(&[cpu_table(), other.clone()], Some("CPU")).unwrap();

        // every row of cpu_table has its own stamp, so each CPU keeps its own
        assert_eq!(pivoted.len(), 5);
        let cpu0: Table = [
            (TIMESTAMP_COLUMN, ints(&[1, 5])),
            ("0::%idle", floats(&[90.1, 87.1])),
            ("0::%user", floats(&[0.0, 4.0])),
        ]
        .into_iter()
        .collect();
        assert_eq!(pivoted[0], cpu0);
        assert_eq!(pivoted[4], other);
    }

    #[test]
    fn test_identifier_missing_from_an_interval_keeps_its_own_stamps() {
        let content = "\
00:00:01     IFACE   rxpck/s
00:10:01        lo      1.00
00:10:01      eth0     10.00
00:20:01      eth0     20.00
00:30:01        lo      9.00
00:30:01      eth0     30.00
";
        let tables = sar_parser::parse(content.lines()).unwrap();
        let pivoted = pivot_tables(&tables, None).unwrap();

        let lo: Table = [
            (TIMESTAMP_COLUMN, text(&["00:10:01", "00:30:01"])),
            ("lo::rxpck/s", floats(&[1.0, 9.0])),
        ]
        .into_iter()
        .collect();
        let eth0: Table = [
            (TIMESTAMP_COLUMN, text(&["00:10:01", "00:20:01", "00:30:01"])),
            ("eth0::rxpck/s", floats(&[10.0, 20.0, 30.0])),
        ]
        .into_iter()
        .collect();

        assert_eq!(pivoted, vec![lo, eth0]);
        assert!(pivoted.iter().all(Table::is_aligned));
    }

    #[test]
    fn test_numeric_cpu_ids_are_detected_and_pivoted() {
        let content = "\
00:00:01     CPU      %usr
00:10:01       0      1.00
00:10:01       1      2.00
00:20:01       0      3.00
00:20:01       1      4.00
";
        let tables = sar_parser::parse(content.lines()).unwrap();
        assert_eq!(detect_identifier_column(&tables[0]), Some("CPU"));

        let pivoted = pivot_tables(&tables, None).unwrap();
        let expected: Table = [
            (TIMESTAMP_COLUMN, text(&["00:10:01", "00:20:01"])),
            ("0::%usr", floats(&[1.0, 3.0])),
            ("1::%usr", floats(&[2.0, 4.0])),
        ]
        .into_iter()
        .collect();
        assert_eq!(pivoted, vec![expected]);
    }

    #[test]
    fn test_pivot_rejects_identifier_longer_than_timestamps() {
        let table: Table = [
            (TIMESTAMP_COLUMN, text(&["a"])),
            ("IFACE", text(&["eth0", "lo"])),
            ("rxpck/s", floats(&[1.0, 2.0])),
        ]
        .into_iter()
        .collect();

        match pivot_tables(&[table], Some("IFACE")) {
            Err(Error::InvalidColumn { column, .. }) => assert_eq!(column, "IFACE"),
            other => panic!("expected InvalidColumn, got {:?}", other),
        }
    }
}
