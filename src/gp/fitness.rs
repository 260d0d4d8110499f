//! Fitness evaluation for the genetic algorithm.
//!
//! Fitness is the net chips a strategy wins over one simulated evaluation.
//! The score is noisy, so every generation re-evaluates every individual.

// Fitness is an integer chip count carried as f64
#![allow(clippy::cast_precision_loss)]

use crate::game::Simulator;
use crate::gp::genome::Strategy;
use crate::rng::task_rng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Score every individual in parallel and store the result in its
/// `fitness` field.
///
/// Individual `i` gets its own generator derived from `generation_seed`, so
/// scores do not depend on which worker evaluates which strategy.
pub fn evaluate_population<F>(population: &mut [Strategy], fitness: &F, generation_seed: u64)
where
    F: Fn(&Strategy, &mut SmallRng) -> f64 + Sync,
{
    population
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, strategy)| {
            let mut rng = task_rng(generation_seed, index as u64);
            strategy.fitness = fitness(strategy, &mut rng);
        });
}

/// Fitness function that plays `simulator`'s conditions against a strategy.
#[must_use]
pub fn simulator_fitness(simulator: Simulator) -> impl Fn(&Strategy, &mut SmallRng) -> f64 + Sync {
    move |strategy: &Strategy, rng: &mut SmallRng| simulator.score(strategy, rng) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TestConditions;
    use rand::SeedableRng;

    #[test]
    fn test_evaluate_population_sets_fitness() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut population: Vec<Strategy> = (0..8).map(|_| Strategy::random(&mut rng)).collect();

        let by_hard_hits = |s: &Strategy, _: &mut SmallRng| {
            s.hard.iter().flatten().filter(|&&a| a == crate::game::Action::Hit).count() as f64
        };
        evaluate_population(&mut population, &by_hard_hits, 1);

        for s in &population {
            assert!((s.fitness - by_hard_hits(s, &mut rng)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_evaluation_is_reproducible() {
        let simulator = Simulator::new(TestConditions {
            hands_per_evaluation: 300,
            ..Default::default()
        })
        .unwrap();
        let fitness = simulator_fitness(simulator);

        let mut rng = SmallRng::seed_from_u64(3);
        let mut a: Vec<Strategy> = (0..6).map(|_| Strategy::random(&mut rng)).collect();
        let mut b = a.clone();

        evaluate_population(&mut a, &fitness, 99);
        evaluate_population(&mut b, &fitness, 99);
        assert_eq!(a, b);
        assert!(a.iter().any(|s| s.fitness.abs() > f64::EPSILON));
    }
}
