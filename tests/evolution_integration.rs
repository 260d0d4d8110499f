//! End-to-end evolution runs with the Blackjack simulator as fitness.
//!
//! Run with: cargo test --release evolution_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use blackjack_evolve::game::{Simulator, TestConditions};
use blackjack_evolve::gp::{
    EngineParameters, MutationConfig, SavedStrategy, SelectionConfig, SelectionStyle, StopReason,
    Strategy, evolve, load_strategy, save_strategy, simulator_fitness,
};
use rand::rngs::SmallRng;
use tempfile::tempdir;

fn small_run(seed: u64) -> (EngineParameters, TestConditions) {
    let engine = EngineParameters {
        population_size: 24,
        min_generations: 3,
        max_generations: 6,
        max_stagnant_generations: 3,
        seed,
        ..Default::default()
    };
    let conditions = TestConditions {
        hands_per_evaluation: 500,
        final_tests: 3,
        ..Default::default()
    };
    (engine, conditions)
}

#[test]
fn test_simulator_driven_run_improves_on_random() {
    let (engine, conditions) = small_run(42);
    let fitness = simulator_fitness(Simulator::new(conditions).unwrap());

    let mut first_average = None;
    let (best, stats) = evolve(&engine, &fitness, |progress, gen_best| {
        if progress.generation == 0 {
            first_average = Some(progress.avg_fitness_this_gen);
        }
        assert!(!gen_best.has_misplaced_split());
        true
    })
    .unwrap();

    assert!(stats.generations_run <= engine.max_generations + 1);
    assert_eq!(stats.generations.len(), stats.generations_run);
    assert!((best.fitness - stats.best_fitness).abs() < f64::EPSILON);
    assert!(stats.best_fitness >= first_average.unwrap());
    assert!(stats.best_average_fitness >= first_average.unwrap());
}

#[test]
fn test_run_saves_and_reloads() {
    let (engine, conditions) = small_run(7);
    let fitness = simulator_fitness(Simulator::new(conditions).unwrap());
    let (best, stats) = evolve(&engine, &fitness, |_, _| true).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("runs").join("best.json");
    let saved = SavedStrategy::new(best, engine, conditions, &stats);
    save_strategy(&saved, &path).unwrap();

    let loaded = load_strategy(&path).unwrap();
    assert_eq!(loaded.strategy, best);
    assert_eq!(loaded.generations_run, stats.generations_run);
    assert_eq!(loaded.stop_reason, stats.stop_reason);

    // The reloaded table scores exactly as the original.
    let sim = Simulator::new(loaded.conditions).unwrap();
    assert_eq!(sim.statistics(&loaded.strategy, 5), sim.statistics(&best, 5));
}

#[test]
fn test_ranked_selection_without_elitism_runs_to_the_limit() {
    let (mut engine, conditions) = small_run(11);
    engine.min_generations = 0;
    engine.max_generations = 2;
    engine.max_stagnant_generations = 100;
    engine.selection = SelectionConfig {
        style: SelectionStyle::Ranked,
        elitism_rate: 0.0,
        ..Default::default()
    };
    engine.mutation = MutationConfig {
        rate: 1.0,
        impact: 0.5,
    };
    let fitness = simulator_fitness(Simulator::new(conditions).unwrap());

    let (_, stats) = evolve(&engine, &fitness, |_, _| true).unwrap();
    assert_eq!(stats.stop_reason, StopReason::MaxGenerations);
    assert_eq!(stats.generations_run, 3);
}

#[test]
fn test_flat_landscape_stagnates() {
    let engine = EngineParameters {
        population_size: 10,
        min_generations: 2,
        max_generations: 50,
        max_stagnant_generations: 4,
        ..Default::default()
    };
    let flat = |_: &Strategy, _: &mut SmallRng| -10.0;
    let (_, stats) = evolve(&engine, &flat, |_, _| true).unwrap();
    assert_eq!(stats.stop_reason, StopReason::Stagnated);
    assert!(stats.generations_run < 50);
}
