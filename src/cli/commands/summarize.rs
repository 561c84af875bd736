//! Summarize command: field averages and extremes

use super::shared::{CliOverrides, load_configuration, read_input_lines, setup_logging};
use crate::Result;
use crate::app::services::sar_parser::ParseStats;
use crate::app::services::sar_processor::{ProcessingResult, SarProcessor};
use crate::cli::args::{CommonArgs, OutputFormat, SummarizeArgs};
use colored::*;
use tracing::{info, warn};

/// Run the summarize command
pub fn run_summarize(args: SummarizeArgs) -> Result<ParseStats> {
    setup_logging(&args)?;
    args.validate()?;

    let overrides = CliOverrides {
        identifier: args.identifier.clone(),
        field_patterns: args.field_patterns(),
        no_auto_pivot: args.no_auto_pivot,
        format: args.format,
    };
    let config = load_configuration(args.config_file(), overrides)?;

    let lines = read_input_lines(args.input())?;
    let processor = SarProcessor::new(config.analysis.clone());
    let result = processor.process_lines(&lines)?;

    if result.report.is_empty() {
        warn!(
            "No numeric columns matched the field patterns: {}",
            config.analysis.field_patterns.join(", ")
        );
    }

    match config.output.format {
        OutputFormat::Human => print!("{}", render_human_report(&result, config.output.precision)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.report)?),
    }

    info!("Summarized {} fields", result.report.len());
    Ok(result.stats)
}

/// Render the report as an aligned, colored text table
pub fn render_human_report(result: &ProcessingResult, precision: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "sar summary".bright_green().bold()));
    output.push_str(&format!("  {}\n\n", result.summary()));

    if result.report.is_empty() {
        output.push_str("No fields matched.\n");
        return output;
    }

    let name_width = result
        .report
        .columns()
        .map(str::len)
        .chain(std::iter::once("field".len()))
        .max()
        .unwrap_or_default();

    output.push_str(&format!(
        "{}\n",
        format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:<14}  {:>12}  {:<14}",
            "field", "sar average", "average", "maximum", "at", "minimum", "at"
        )
        .bold()
    ));

    for summary in result.report.summaries() {
        let reported = summary
            .reported_average
            .map(|value| format!("{:.precision$}", value.as_f64()))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{}  {:>12}  {}  {}  {:<14}  {}  {:<14}\n",
            format!("{:<name_width$}", summary.column).cyan(),
            reported,
            format!("{:>12.precision$}", summary.average).bright_white().bold(),
            format!("{:>12}", summary.maximum.measurement.to_string()).red(),
            summary.maximum.timestamp.to_string(),
            format!("{:>12}", summary.minimum.measurement.to_string()).green(),
            summary.minimum.timestamp.to_string(),
        ));
    }

    output
}
