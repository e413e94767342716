mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::ratios::{IndustriesArgs, RatiosArgs};
use commands::time_value::{FutureValueArgs, PresentValueArgs};
use commands::valuation::WaccArgs;

/// Cost of capital, time value and sector ratio analysis
#[derive(Parser)]
#[command(
    name = "finind",
    version,
    about = "Cost of capital, time value and sector ratio analysis",
    long_about = "A CLI for computing financial indicators with decimal precision. \
                  Supports WACC (CMPC), future and present value schedules, and \
                  accounting ratios compared against sector averages with \
                  recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the Weighted Average Cost of Capital (CMPC)
    Wacc(WaccArgs),
    /// Year-by-year future value of an investment
    FutureValue(FutureValueArgs),
    /// Year-by-year present value of a future amount
    PresentValue(PresentValueArgs),
    /// Compute financial ratios and compare them with a sector
    Ratios(RatiosArgs),
    /// List the industries of the sector reference table
    Industries(IndustriesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Wacc(args) => commands::valuation::run_wacc(args),
        Commands::FutureValue(args) => commands::time_value::run_future_value(args),
        Commands::PresentValue(args) => commands::time_value::run_present_value(args),
        Commands::Ratios(args) => commands::ratios::run_ratios(args),
        Commands::Industries(args) => commands::ratios::run_industries(args),
        Commands::Version => {
            println!("finind {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
