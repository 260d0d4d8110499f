//! Show command implementation.

#![allow(clippy::needless_pass_by_value)]

use super::output::format_strategy;
use super::{CliError, ReportFormat, load_saved};
use blackjack_evolve::gp::BookStrategy;
use std::path::PathBuf;

/// Execute the show command.
///
/// Prints the tables of a saved strategy, or of the book baseline when no
/// file is given.
///
/// # Errors
///
/// Returns an error if the strategy file cannot be loaded.
pub(crate) fn execute(strategy: Option<PathBuf>, format: ReportFormat) -> Result<(), CliError> {
    let saved = strategy.as_deref().map(load_saved).transpose()?;
    let table = saved
        .as_ref()
        .map_or_else(|| *BookStrategy::new().strategy(), |s| s.strategy);

    match format {
        ReportFormat::Text => {
            if let Some(saved) = &saved {
                println!(
                    "Fitness {:.0} from generation {} of {} (seed {})",
                    saved.strategy.fitness,
                    saved.best_generation,
                    saved.generations_run,
                    saved.engine.seed
                );
                println!();
            }
            print!("{}", format_strategy(&table));
        }
        ReportFormat::Json => match &saved {
            Some(saved) => println!("{}", serde_json::to_string_pretty(saved)?),
            None => println!("{}", serde_json::to_string_pretty(&table)?),
        },
    }

    Ok(())
}
