//! # regiondir CLI entry point
//!
//! Parses command-line arguments, builds the directory from the configured
//! dataset, and dispatches to the lookup handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regiondir_cli::lookup::{
    run_codes, run_country, run_stats, run_subdivision, CodesArgs, CountryArgs, SubdivisionArgs,
};
use regiondir_core::{DatasetSource, Directory, DATASET_ENV_VAR};

/// ISO 3166 country and subdivision lookups.
///
/// Resolves alpha-2 codes, alpha-3 codes, region codes, and display names
/// against the bundled ISO 3166 tables or a dataset of your own, and prints
/// the matching record as JSON.
#[derive(Parser, Debug)]
#[command(name = "regiondir", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Dataset file (.json, .yaml, .yml) or two-table directory.
    /// Overrides the REGIONDIR_DATASET environment variable.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Print single-line JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a country by alpha-2, alpha-3, or name.
    Country(CountryArgs),

    /// Look up a subdivision by region code, or by country and code/name.
    Subdivision(SubdivisionArgs),

    /// Print the alpha-3 index, or resolve one alpha-3 code.
    Codes(CodesArgs),

    /// Print directory counts.
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let source = DatasetSource::resolve(cli.dataset);
    tracing::info!(%source, env_var = DATASET_ENV_VAR, "loading dataset");
    let dir = Directory::open(&source)
        .with_context(|| format!("failed to load dataset from {source}"))?;

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Country(args) => run_country(&args, &dir, &mut stdout, cli.compact),
        Commands::Subdivision(args) => run_subdivision(&args, &dir, &mut stdout, cli.compact),
        Commands::Codes(args) => run_codes(&args, &dir, &mut stdout, cli.compact),
        Commands::Stats => run_stats(&dir, &mut stdout, cli.compact),
    }
}
