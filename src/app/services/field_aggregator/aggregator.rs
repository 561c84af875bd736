//! Field selection and statistical aggregation
//!
//! Columns are selected by plain substring containment, merged by name across
//! tables, and reduced to an average plus the rows holding the maximum and
//! minimum values.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::report::{AggregateReport, Extreme};
use crate::app::models::{CellValue, Number, Table};
use crate::constants::{AVERAGE_LABEL, TIMESTAMP_COLUMN};
use crate::{Error, Result};

/// Select the columns matching any pattern and summarize them
///
/// Patterns that match nothing are ignored. Text columns reached only through
/// a substring match are skipped; naming a text column in full is an error.
pub fn isolate_desired_fields<P>(tables: &[Table], field_patterns: &[P]) -> Result<AggregateReport>
where
    P: AsRef<str>,
{
    let patterns: Vec<&str> = field_patterns.iter().map(AsRef::as_ref).collect();
    let mut selected: IndexMap<String, Series> = IndexMap::new();

    for table in tables {
        let timestamps = table.timestamps();

        for (name, values) in table.columns() {
            if name == TIMESTAMP_COLUMN {
                if is_explicit_request(name, &patterns) {
                    return Err(Error::invalid_column(
                        name,
                        "holds timestamps, not measurements",
                    ));
                }
                continue;
            }

            if !matches_any(name, &patterns) {
                continue;
            }

            if !values.iter().all(CellValue::is_numeric) {
                if is_explicit_request(name, &patterns) {
                    return Err(Error::invalid_column(name, "holds text, not measurements"));
                }
                debug!("Skipping text column '{}' matched by substring", name);
                continue;
            }

            if let Some(timestamps) = timestamps {
                if values.len() > timestamps.len() {
                    return Err(Error::invalid_column(
                        name,
                        format!(
                            "has {} values but its table has only {} timestamps",
                            values.len(),
                            timestamps.len()
                        ),
                    ));
                }
            }

            let series = selected.entry(name.to_string()).or_default();
            for (row, value) in values.iter().enumerate() {
                let Some(number) = value.as_number() else {
                    continue;
                };
                let stamp = timestamps
                    .map(|timestamps| timestamps[row].clone())
                    .unwrap_or_else(|| CellValue::Text(String::new()));
                series.push(number, stamp);
            }
        }
    }

    let mut report = AggregateReport::new();
    for (name, series) in selected {
        let Some(statistics) = series.statistics() else {
            debug!("Column '{}' has no values, omitting", name);
            continue;
        };

        if let [reported] = series.reported.as_slice() {
            report.reported_averages.insert(name.clone(), *reported);
        }
        report.averages.insert(name.clone(), statistics.average);
        report.maximums.insert(name.clone(), statistics.maximum);
        report.minimums.insert(name, statistics.minimum);
    }

    info!(
        "Aggregated {} columns from {} tables for {} patterns",
        report.len(),
        tables.len(),
        patterns.len()
    );

    Ok(report)
}

/// Whether a column name contains any of the patterns
pub fn matches_any(column: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| column.contains(pattern))
}

/// Whether a pattern names the column in full
pub fn is_explicit_request(column: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| *pattern == column)
}

/// Values of one selected column, merged across tables
#[derive(Debug, Default)]
struct Series {
    samples: Vec<(Number, CellValue)>,
    reported: Vec<Number>,
}

struct SeriesStatistics {
    average: f64,
    maximum: Extreme,
    minimum: Extreme,
}

impl Series {
    fn push(&mut self, value: Number, timestamp: CellValue) {
        if timestamp.as_text() == Some(AVERAGE_LABEL) {
            self.reported.push(value);
        }
        self.samples.push((value, timestamp));
    }

    fn statistics(&self) -> Option<SeriesStatistics> {
        if self.samples.is_empty() {
            return None;
        }

        let mut sum = 0.0;
        let mut max_index = 0;
        let mut min_index = 0;
        for (index, (value, _)) in self.samples.iter().enumerate() {
            sum += value.as_f64();
            // Strict comparisons keep the first occurrence on ties
            if *value > self.samples[max_index].0 {
                max_index = index;
            }
            if *value < self.samples[min_index].0 {
                min_index = index;
            }
        }

        let extreme = |index: usize| {
            let (value, timestamp) = &self.samples[index];
            Extreme::new(*value, timestamp.clone())
        };

        Some(SeriesStatistics {
            average: sum / self.samples.len() as f64,
            maximum: extreme(max_index),
            minimum: extreme(min_index),
        })
    }
}
