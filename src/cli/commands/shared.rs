//! Shared components for CLI commands
//!
//! Logging setup, input reading and configuration loading used by every
//! subcommand.

use crate::cli::args::{CommonArgs, OutputFormat, STDIN_MARKER};
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &impl CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let initialized = if args.quiet() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
    };
    initialized
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read every line of a file, or of standard input for `-`
pub fn read_input_lines(input: &Path) -> Result<Vec<String>> {
    if input == Path::new(STDIN_MARKER) {
        info!("Reading sar report from standard input");
        return read_lines(io::stdin().lock())
            .map_err(|e| Error::io("Failed to read standard input", e));
    }

    info!("Reading sar report from {}", input.display());
    let file = File::open(input)
        .map_err(|e| Error::io(format!("Failed to open {}", input.display()), e))?;
    read_lines(BufReader::new(file))
        .map_err(|e| Error::io(format!("Failed to read {}", input.display()), e))
}

/// Collect a reader's lines, stopping at the first read or UTF-8 error
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub identifier: Option<String>,
    pub field_patterns: Option<Vec<String>>,
    pub no_auto_pivot: bool,
    pub format: Option<OutputFormat>,
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(config_file: Option<&Path>, overrides: CliOverrides) -> Result<Config> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, looking in the working directory"),
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, overrides);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, overrides: CliOverrides) {
    if let Some(identifier) = overrides.identifier {
        config.analysis.identifier_column = Some(identifier);
    }
    if let Some(patterns) = overrides.field_patterns {
        config.analysis.field_patterns = patterns;
    }
    if overrides.no_auto_pivot {
        config.analysis.auto_pivot = false;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
}
