//! Output formatting utilities for CLI.

use blackjack_evolve::game::{Rank, Statistics};
use blackjack_evolve::gp::{
    EngineProgress, EvolutionStats, GenerationStats, HIGHEST_HARD_TOTAL, HIGHEST_SOFT_REMAINDER,
    LOWEST_HARD_TOTAL, LOWEST_SOFT_REMAINDER, Strategy,
};
use serde::Serialize;
use std::fmt::Write;

/// One progress line per generation.
pub(super) fn format_progress(progress: &EngineProgress) -> String {
    format!(
        "Gen {}: best={:.0} avg={:.1} all-time={:.0} ({:.1}s)",
        progress.generation,
        progress.best_fitness_this_gen,
        progress.avg_fitness_this_gen,
        progress.best_fitness_so_far,
        progress.generation_time.as_secs_f64()
    )
}

/// Header row of upcard labels, indented past a row label of `label_width`.
fn upcard_header(label_width: usize) -> String {
    let mut line = format!("{:label_width$} |", "");
    for upcard in Rank::CLASSES {
        let _ = write!(line, " {}", upcard.symbol());
    }
    line.push('\n');
    line
}

/// Render the three tables with dealer upcards across the top.
///
/// Hard totals run from 20 down to 5, soft hands from A2 to A9 and pairs
/// from 2-2 to A-A.
pub(super) fn format_strategy(strategy: &Strategy) -> String {
    let mut output = String::new();

    output.push_str("Hard totals\n");
    output.push_str(&upcard_header(3));
    for total in (LOWEST_HARD_TOTAL..=HIGHEST_HARD_TOTAL).rev() {
        let _ = write!(output, "{total:>3} |");
        for upcard in Rank::CLASSES {
            let _ = write!(output, " {}", strategy.hard_action(upcard, total).symbol());
        }
        output.push('\n');
    }

    output.push_str("\nSoft hands\n");
    output.push_str(&upcard_header(3));
    for remainder in LOWEST_SOFT_REMAINDER..=HIGHEST_SOFT_REMAINDER {
        let _ = write!(output, " A{remainder} |");
        for upcard in Rank::CLASSES {
            let _ = write!(output, " {}", strategy.soft_action(upcard, remainder).symbol());
        }
        output.push('\n');
    }

    output.push_str("\nPairs\n");
    output.push_str(&upcard_header(3));
    for pair in Rank::CLASSES {
        let symbol = pair.symbol();
        let _ = write!(output, "{symbol:>2}{symbol} |");
        for upcard in Rank::CLASSES {
            let _ = write!(output, " {}", strategy.pair_action(upcard, pair).symbol());
        }
        output.push('\n');
    }

    output
}

/// Render repeated-run statistics.
pub(super) fn format_statistics(label: &str, stats: &Statistics) -> String {
    format!(
        "{label}: mean={:.1} std-dev={:.1} cv={:.3} over {} runs\n",
        stats.mean,
        stats.std_dev,
        stats.coefficient_of_variation,
        stats.scores.len()
    )
}

/// Render the summary of a finished run.
pub(super) fn format_run_summary(stats: &EvolutionStats) -> String {
    let mut output = String::new();
    output.push_str("Evolution complete!\n");
    let _ = writeln!(output, "  Stopped: {:?}", stats.stop_reason);
    let _ = writeln!(output, "  Generations run: {}", stats.generations_run);
    let _ = writeln!(
        output,
        "  Best fitness: {:.0} (generation {})",
        stats.best_fitness, stats.best_generation
    );
    let _ = writeln!(
        output,
        "  Best average: {:.1} (generation {})",
        stats.best_average_fitness, stats.best_average_generation
    );
    let _ = writeln!(output, "  Elapsed time: {:.1}s", stats.elapsed_seconds);
    output
}

/// Format per-generation statistics as CSV.
pub(super) fn format_generations_csv(generations: &[GenerationStats]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("generation,best,average,std_dev,best_so_far,seconds\n");

    // Data rows
    for g in generations {
        let _ = writeln!(
            output,
            "{},{:.0},{:.2},{:.2},{:.0},{:.3}",
            g.generation, g.best_fitness, g.mean_fitness, g.fitness_std, g.best_so_far, g.seconds
        );
    }

    output
}

/// JSON-serializable result of the `evolve` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonEvolveResult<'a> {
    /// Run statistics.
    pub(super) run: &'a EvolutionStats,
    /// The best strategy found.
    pub(super) strategy: &'a Strategy,
    /// Repeated-run statistics of the best strategy.
    pub(super) best: &'a Statistics,
    /// Repeated-run statistics of the book baseline.
    pub(super) baseline: &'a Statistics,
}

/// JSON-serializable result of the `score` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonScoreResult<'a> {
    /// What was scored.
    pub(super) policy: &'a str,
    /// Repeated-run statistics.
    pub(super) statistics: &'a Statistics,
}
