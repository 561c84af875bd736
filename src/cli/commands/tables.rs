//! Tables command: print parsed sar tables

use super::shared::{CliOverrides, load_configuration, read_input_lines, setup_logging};
use crate::Result;
use crate::app::models::Table;
use crate::app::services::sar_parser::{ParseStats, parse_with_stats};
use crate::app::services::sar_processor::SarProcessor;
use crate::cli::args::{CommonArgs, OutputFormat, TablesArgs};
use colored::*;
use tracing::info;

/// Run the tables command
pub fn run_tables(args: TablesArgs) -> Result<ParseStats> {
    setup_logging(&args)?;
    args.validate()?;

    let overrides = CliOverrides {
        identifier: args.identifier.clone(),
        field_patterns: None,
        no_auto_pivot: args.no_auto_pivot,
        format: args.format,
    };
    let config = load_configuration(args.config_file(), overrides)?;

    let lines = read_input_lines(args.input())?;
    let parsed = parse_with_stats(&lines)?;
    info!("Parsed sar input: {}", parsed.stats.summary());

    let tables = if args.raw {
        parsed.tables
    } else {
        SarProcessor::new(config.analysis).pivot(&parsed.tables)?
    };

    match config.output.format {
        OutputFormat::Human => {
            for (index, table) in tables.iter().enumerate() {
                print!("{}", render_table(index + 1, table));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
    }

    Ok(parsed.stats)
}

/// Render one table as a fixed-width text grid
///
/// Rows shorter than the longest column are padded with blank cells.
pub fn render_table(number: usize, table: &Table) -> String {
    let mut output = format!(
        "{} ({} rows x {} columns)\n",
        format!("Table {}", number).bright_green().bold(),
        table.row_count(),
        table.column_count()
    );

    let cells: Vec<(&str, Vec<String>)> = table
        .columns()
        .map(|(name, values)| (name, values.iter().map(ToString::to_string).collect()))
        .collect();

    let widths: Vec<usize> = cells
        .iter()
        .map(|(name, values)| {
            values
                .iter()
                .map(String::len)
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let header: Vec<String> = cells
        .iter()
        .zip(&widths)
        .map(|((name, _), width)| format!("{:>width$}", name))
        .collect();
    output.push_str(&format!("{}\n", header.join("  ").bold()));

    for row in 0..table.row_count() {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|((_, values), width)| {
                format!("{:>width$}", values.get(row).map(String::as_str).unwrap_or(""))
            })
            .collect();
        output.push_str(&line.join("  "));
        output.push('\n');
    }

    output.push('\n');
    output
}
