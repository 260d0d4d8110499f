//! Evolve command implementation.

#![allow(clippy::needless_pass_by_value)]

use super::output::{
    JsonEvolveResult, format_generations_csv, format_progress, format_run_summary,
    format_statistics, format_strategy,
};
use super::settings::{EngineArgs, Settings, SimulationArgs};
use super::{CliError, EvolveFormat, configure_threads};
use blackjack_evolve::game::Simulator;
use blackjack_evolve::gp::{BookStrategy, SavedStrategy, evolve, save_strategy, simulator_fitness};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Execute the evolve command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the result cannot be
/// saved.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    config: Option<PathBuf>,
    engine_args: EngineArgs,
    simulation_args: SimulationArgs,
    seed: Option<u64>,
    threads: Option<usize>,
    format: EvolveFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut settings = Settings::load_or_default(config.as_deref())?;
    engine_args.apply(&mut settings.engine);
    simulation_args.apply(&mut settings.conditions);
    if let Some(s) = seed {
        settings.engine.seed = s;
    }
    settings.engine.validate()?;

    configure_threads(threads);

    let simulator = Simulator::new(settings.conditions)?;
    let fitness = simulator_fitness(simulator);
    let engine = settings.engine;

    // Text output reports each generation above the bar; other formats keep
    // stdout clean for the final document.
    let pb = if quiet {
        None
    } else {
        let pb = ProgressBar::new(engine.max_generations as u64 + 1);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] gen {pos} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    };
    let echo_generations = format == EvolveFormat::Text;

    let (best, stats) = evolve(&engine, &fitness, |progress, _best_this_gen| {
        if let Some(pb) = &pb {
            if echo_generations {
                pb.println(format_progress(progress));
            }
            pb.set_message(format!("all-time={:.0}", progress.best_fitness_so_far));
            pb.inc(1);
        }
        true
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let best_stats = simulator.statistics(&best, engine.seed);
    let baseline_stats = simulator.statistics(&BookStrategy::new(), engine.seed);

    if let Some(path) = &save {
        let saved = SavedStrategy::new(best, engine, settings.conditions, &stats);
        save_strategy(&saved, path)?;
    }

    match format {
        EvolveFormat::Text => {
            println!();
            print!("{}", format_run_summary(&stats));
            println!();
            print!("{}", format_strategy(&best));
            println!();
            print!("{}", format_statistics("Evolved", &best_stats));
            print!("{}", format_statistics("Book", &baseline_stats));
            if let Some(path) = &save {
                println!();
                println!("Saved best strategy to {}", path.display());
            }
        }
        EvolveFormat::Json => {
            let result = JsonEvolveResult {
                run: &stats,
                strategy: &best,
                best: &best_stats,
                baseline: &baseline_stats,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        EvolveFormat::Csv => {
            print!("{}", format_generations_csv(&stats.generations));
        }
    }

    Ok(())
}
