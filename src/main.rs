use clap::Parser;
use sarcery::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Output has already been written by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("sarcery - sar report parser and summarizer");
    println!("==========================================");
    println!();
    println!("Parse the plain-text output of sar into tables and summarize");
    println!("the average, maximum and minimum of selected fields.");
    println!();
    println!("USAGE:");
    println!("    sarcery <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    summarize   Summarize selected fields (averages, maximums, minimums)");
    println!("    tables      Print the parsed tables, pivoted by identifier");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize CPU usage from a saved report:");
    println!("    sar -u ALL -P ALL > cpu.txt && sarcery summarize cpu.txt --fields %usr,%idle");
    println!();
    println!("    # Read from standard input and print JSON:");
    println!("    sar -r | sarcery summarize - --format json");
    println!();
    println!("    # Show network tables pivoted by interface:");
    println!("    sarcery tables net.txt --identifier IFACE");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sarcery <COMMAND> --help");
}
