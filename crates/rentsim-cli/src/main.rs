mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::depreciation::{DepreciationArgs, UsefulLifeArgs};
use commands::loan::{LoanPaymentArgs, LoanScheduleArgs};
use commands::project::ProjectArgs;
use commands::tax::TaxArgs;

/// Rental-property financial simulation
#[derive(Parser)]
#[command(
    name = "rentsim",
    version,
    about = "Rental-property financial simulation",
    long_about = "A CLI for rental-property investment analysis with decimal precision. \
                  Supports progressive tax, loan amortisation schedules, depreciation, \
                  useful-life estimation, and multi-year cash-flow projection."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Progressive income + resident tax on a taxable amount
    Tax(TaxArgs),
    /// Annual loan payment from principal, rate, and term
    LoanPayment(LoanPaymentArgs),
    /// Month-by-month or year-by-year amortisation schedule
    LoanSchedule(LoanScheduleArgs),
    /// Year-by-year depreciation register for an asset
    Depreciation(DepreciationArgs),
    /// Estimate the depreciable life of a used building
    UsefulLife(UsefulLifeArgs),
    /// Run a multi-year cash-flow projection
    Project(ProjectArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::LoanPayment(args) => commands::loan::run_loan_payment(args),
        Commands::LoanSchedule(args) => commands::loan::run_loan_schedule(args),
        Commands::Depreciation(args) => commands::depreciation::run_depreciation(args),
        Commands::UsefulLife(args) => commands::depreciation::run_useful_life(args),
        Commands::Project(args) => commands::project::run_project(args),
        Commands::Version => {
            println!("rentsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
