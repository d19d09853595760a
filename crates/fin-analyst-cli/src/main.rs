mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::kpi::{EarningsArgs, KpiArgs, PeriodsArgs};
use commands::request::RequestArgs;
use config::GlobalOptions;

/// Balance sheet and income statement KPI analysis
#[derive(Parser)]
#[command(
    name = "fa",
    version,
    about = "Balance sheet and income statement KPI analysis",
    long_about = "Computes liquidity, leverage, profitability and turnover KPIs from \
                  balance sheet and income statement figures with decimal precision. \
                  Ratios with a zero denominator are reported as 0."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true, env = "FA_OUTPUT")]
    output: OutputFormat,

    #[command(flatten)]
    options: GlobalOptions,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate KPIs for a single reporting period
    Kpis(KpiArgs),
    /// Calculate KPIs for several reporting periods
    Periods(PeriodsArgs),
    /// Quick earnings and return on equity
    Earnings(EarningsArgs),
    /// Run a request through the API handler and print status and body
    Request(RequestArgs),
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

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options.to_kpi_options();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Kpis(args) => commands::kpi::run_kpis(args, &options),
        Commands::Periods(args) => commands::kpi::run_periods(args, &options),
        Commands::Earnings(args) => commands::kpi::run_earnings(args, &options),
        Commands::Request(args) => commands::request::run_request(args, &options),
        Commands::Version => {
            println!("fa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            let failed = value
                .get("status")
                .and_then(|s| s.as_u64())
                .is_some_and(|status| status >= 400);
            process::exit(if failed { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
