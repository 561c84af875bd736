//! End-to-end sar processing pipeline
//!
//! Ties the parser, the identifier pivot and the field aggregator together:
//! raw lines in, pivoted tables plus an aggregate report out.

use crate::Result;
use crate::app::models::Table;
use crate::app::services::field_aggregator::{AggregateReport, isolate_desired_fields};
use crate::app::services::identifier_pivot::pivot_tables;
use crate::app::services::sar_parser::{ParseStats, parse_with_stats};
use crate::config::AnalysisConfig;
use tracing::{debug, info};

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    /// Tables after pivoting, in first-appearance order
    pub tables: Vec<Table>,
    pub report: AggregateReport,
    pub stats: ParseStats,
}

impl ProcessingResult {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// One-line description for logs and the human report header
    pub fn summary(&self) -> String {
        format!(
            "{}; {} fields summarized",
            self.stats.summary(),
            self.report.len()
        )
    }
}

/// Runs parse, pivot and aggregation according to an [`AnalysisConfig`]
///
/// ```rust
/// use sarcery::app::services::sar_processor::SarProcessor;
/// use sarcery::config::AnalysisConfig;
///
/// # fn example() -> sarcery::Result<()> {
/// let processor = SarProcessor::new(AnalysisConfig::default().with_field_patterns(["%usr"]));
/// let result = processor.process_lines([
///     "12:00:02 AM     CPU      %usr",
///     "12:10:02 AM     all      1.47",
///     "12:10:02 AM       0      0.34",
/// ])?;
/// assert_eq!(result.report.columns().collect::<Vec<_>>(), vec!["all::%usr", "0::%usr"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SarProcessor {
    config: AnalysisConfig,
}

impl SarProcessor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse the lines, pivot the resulting tables and aggregate the configured fields
    pub fn process_lines<I, S>(&self, lines: I) -> Result<ProcessingResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.validate()?;

        let parsed = parse_with_stats(lines)?;
        info!("Parsed sar input: {}", parsed.stats.summary());

        let tables = self.pivot(&parsed.tables)?;
        let report = isolate_desired_fields(&tables, &self.config.field_patterns)?;

        let result = ProcessingResult {
            tables,
            report,
            stats: parsed.stats,
        };
        info!("Processing complete: {}", result.summary());

        Ok(result)
    }

    /// Pivot tables as configured: a named identifier, detection, or nothing
    pub fn pivot(&self, tables: &[Table]) -> Result<Vec<Table>> {
        match (&self.config.identifier_column, self.config.auto_pivot) {
            (Some(identifier), _) => {
                debug!("Pivoting tables on '{}'", identifier);
                pivot_tables(tables, Some(identifier.as_str()))
            }
            (None, true) => {
                debug!("Pivoting tables on detected identifier columns");
                pivot_tables(tables, None)
            }
            (None, false) => {
                debug!("Pivoting disabled, keeping {} tables as parsed", tables.len());
                Ok(tables.to_vec())
            }
        }
    }
}
