//! TechGear CLI - Synthetic sales dataset generation and validation.
//!
//! # Commands
//!
//! - `techgear generate` - Generate products, customers and transactions as CSV
//! - `techgear validate` - Run data quality and business logic checks
//! - `techgear completions <shell>` - Print shell completions
//!
//! # Examples
//!
//! ```bash
//! # Generate the default 50,000 transactions into data/raw
//! techgear generate
//!
//! # Small reproducible sample with seasonal pricing
//! techgear generate --seed 7 --transactions 1000 --apply-demand-adjustment --output sample
//!
//! # Validate a dataset directory
//! techgear validate --data-dir sample
//! ```
//!
//! Settings come from built-in defaults, an optional `--config` TOML file and
//! `TECHGEAR__*` environment variables; command-line flags win over both.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use techgear_data::config::TechGearConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::generate::{self, GenerateArgs};
use commands::validate;
use error::CliResult;

/// TechGear CLI - Synthetic retail dataset tooling
#[derive(Parser)]
#[command(name = "techgear")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write it as CSV
    Generate {
        /// Output directory (default: data/raw)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of transactions
        #[arg(short, long)]
        transactions: Option<u32>,

        /// Number of customers
        #[arg(long)]
        customers: Option<u32>,

        /// Scale unit prices by yearly growth and seasonal demand
        #[arg(long)]
        apply_demand_adjustment: bool,
    },

    /// Validate a generated dataset
    Validate {
        /// Directory holding the CSV tables (default: data/raw)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn print_banner() {
    println!(
        "  {} {}\n",
        "TechGear Plus Data Toolkit".bright_white().bold(),
        format!("v{}", techgear_data::VERSION).dimmed()
    );
}

fn run(cli: Cli) -> CliResult<()> {
    if let Commands::Completions { shell } = cli.command {
        use clap::CommandFactory;
        clap_complete::generate(shell, &mut Cli::command(), "techgear", &mut std::io::stdout());
        return Ok(());
    }

    if !cli.quiet {
        print_banner();
    }

    let config = TechGearConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            output,
            seed,
            transactions,
            customers,
            apply_demand_adjustment,
        } => generate::execute(
            config,
            GenerateArgs {
                output,
                seed,
                transactions,
                customers,
                apply_demand_adjustment,
            },
            cli.quiet,
        ),

        Commands::Validate { data_dir } => validate::execute(config, data_dir),

        Commands::Completions { .. } => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
