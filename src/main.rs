//! bjevolve CLI - evolve, score and inspect Blackjack strategies.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// bjevolve - genetic search for Blackjack strategy tables
#[derive(Parser, Debug)]
#[command(name = "bjevolve")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a strategy and report it against the book baseline
    Evolve {
        /// JSON settings file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        engine: cli::settings::EngineArgs,

        #[command(flatten)]
        simulation: cli::settings::SimulationArgs,

        /// Random seed (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::EvolveFormat,

        /// Save the best strategy to a JSON file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Hide the progress bar and per-generation lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Score a saved strategy (or the book baseline) over repeated runs
    Score {
        /// Saved strategy file (default: book baseline)
        strategy: Option<PathBuf>,

        /// JSON settings file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        simulation: cli::settings::SimulationArgs,

        /// Random seed (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,
    },

    /// Print the tables of a saved strategy (or the book baseline)
    Show {
        /// Saved strategy file (default: book baseline)
        strategy: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Evolve {
            config,
            engine,
            simulation,
            seed,
            threads,
            format,
            save,
            quiet,
        } => cli::evolve::execute(config, engine, simulation, seed, threads, format, save, quiet),

        Commands::Score {
            strategy,
            config,
            simulation,
            seed,
            threads,
            format,
        } => cli::score::execute(strategy, config, simulation, seed, threads, format),

        Commands::Show { strategy, format } => cli::show::execute(strategy, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
