//! Score command implementation.

#![allow(clippy::needless_pass_by_value)]

use super::output::{JsonScoreResult, format_statistics};
use super::settings::{Settings, SimulationArgs};
use super::{CliError, ReportFormat, configure_threads, load_saved};
use blackjack_evolve::game::Simulator;
use blackjack_evolve::gp::BookStrategy;
use std::path::PathBuf;

/// Execute the score command.
///
/// Scores a saved strategy, or the book baseline when no file is given.
///
/// # Errors
///
/// Returns an error if the strategy file cannot be loaded or the conditions
/// are invalid.
pub(crate) fn execute(
    strategy: Option<PathBuf>,
    config: Option<PathBuf>,
    simulation_args: SimulationArgs,
    seed: Option<u64>,
    threads: Option<usize>,
    format: ReportFormat,
) -> Result<(), CliError> {
    let mut settings = Settings::load_or_default(config.as_deref())?;
    simulation_args.apply(&mut settings.conditions);
    let seed = seed.unwrap_or(settings.engine.seed);

    configure_threads(threads);
    let simulator = Simulator::new(settings.conditions)?;

    let (label, stats) = match &strategy {
        Some(path) => {
            let saved = load_saved(path)?;
            (path.display().to_string(), simulator.statistics(&saved.strategy, seed))
        }
        None => ("book".to_string(), simulator.statistics(&BookStrategy::new(), seed)),
    };

    match format {
        ReportFormat::Text => {
            let c = simulator.conditions();
            println!(
                "{} hands x {} runs, {} decks, bet {}, natural pays {}{}",
                c.hands_per_evaluation,
                c.final_tests,
                c.num_decks,
                c.bet_size,
                c.blackjack_payoff,
                if c.stack_deck { ", stacked" } else { "" }
            );
            print!("{}", format_statistics(&label, &stats));
        }
        ReportFormat::Json => {
            let result = JsonScoreResult {
                policy: &label,
                statistics: &stats,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
