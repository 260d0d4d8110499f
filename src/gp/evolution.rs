//! Main evolution loop for the genetic algorithm.
//!
//! Each generation is evaluated in parallel, reported to the caller, checked
//! for termination, and then bred into the next generation:
//!
//! 1. Seed the population with random strategies.
//! 2. Score every strategy and track the best of the generation, the best
//!    ever, and the best generation average.
//! 3. Hand the caller a progress record; returning `false` stops the run.
//! 4. After `min_generations`, stop once both the best and the best average
//!    have stagnated, or when `max_generations` is reached.
//! 5. Keep the elites, then fill the population with mutated crossovers.

// Evolution uses intentional casts for counts and averages
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use crate::error::ConfigError;
use crate::gp::crossover::{CrossoverConfig, crossover};
use crate::gp::fitness::evaluate_population;
use crate::gp::genome::Strategy;
use crate::gp::mutation::{MutationConfig, mutate};
use crate::gp::selection::{SelectionConfig, SelectionStats, prepare_for_selection, select_parent};
use crate::rng::task_rng;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Population size.
    pub population_size: usize,
    /// Generations always run before stagnation can stop the search.
    pub min_generations: usize,
    /// Hard generation limit.
    pub max_generations: usize,
    /// Generations without a new best and a new best average before stopping.
    pub max_stagnant_generations: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// Selection configuration.
    pub selection: SelectionConfig,
    /// Crossover configuration.
    pub crossover: CrossoverConfig,
    /// Mutation configuration.
    pub mutation: MutationConfig,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            population_size: 150,
            min_generations: 25,
            max_generations: 250,
            max_stagnant_generations: 16,
            seed: 42,
            selection: SelectionConfig::default(),
            crossover: CrossoverConfig::default(),
            mutation: MutationConfig::default(),
        }
    }
}

impl EngineParameters {
    /// Check every field before a run starts.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        self.selection.validate(self.population_size)?;
        if self.min_generations > self.max_generations {
            return Err(ConfigError::Generations {
                min: self.min_generations,
                max: self.max_generations,
            });
        }
        self.mutation.validate()
    }
}

/// Progress record handed to the caller after each generation is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineProgress {
    /// Generation number, starting at 0.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness_this_gen: f64,
    /// Mean fitness of this generation.
    pub avg_fitness_this_gen: f64,
    /// Best fitness seen in any generation so far.
    pub best_fitness_so_far: f64,
    /// Wall time from the start of this generation to its report.
    pub generation_time: Duration,
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
    /// Best fitness seen so far.
    pub best_so_far: f64,
    /// Generation wall time in seconds.
    pub seconds: f64,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The progress callback asked to stop.
    Cancelled,
    /// Neither the best nor the best average improved for long enough.
    Stagnated,
    /// The generation limit was reached.
    MaxGenerations,
}

/// Overall statistics from an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Generation where best fitness was achieved.
    pub best_generation: usize,
    /// Best generation average.
    pub best_average_fitness: f64,
    /// Generation where the best average was achieved.
    pub best_average_generation: usize,
    /// Number of generations evaluated.
    pub generations_run: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// Error during evolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionError {
    /// The engine parameters were rejected.
    Config(ConfigError),
}

impl std::fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid engine parameters: {e}"),
        }
    }
}

impl std::error::Error for EvolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EvolutionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Running bests across generations.
#[derive(Debug)]
struct Record {
    best: Strategy,
    best_fitness: f64,
    best_generation: usize,
    best_average: f64,
    best_average_generation: usize,
}

impl Record {
    fn is_stagnant(&self, generation: usize, limit: usize) -> bool {
        generation - self.best_generation >= limit
            && generation - self.best_average_generation >= limit
    }
}

/// Run the genetic algorithm.
///
/// `fitness` scores one strategy with a generator private to that
/// evaluation. `progress` is called once per generation with the progress
/// record and the best strategy of that generation; returning `false` stops
/// the run after the current generation.
///
/// Returns the best strategy ever seen (with the fitness it scored) and the
/// run statistics.
///
/// # Errors
///
/// Returns an error if the parameters are invalid. Nothing is evaluated in
/// that case.
pub fn evolve<F, P>(
    params: &EngineParameters,
    fitness: &F,
    mut progress: P,
) -> Result<(Strategy, EvolutionStats), EvolutionError>
where
    F: Fn(&Strategy, &mut SmallRng) -> f64 + Sync,
    P: FnMut(&EngineProgress, &Strategy) -> bool,
{
    params.validate()?;

    let start_time = Instant::now();
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let population_size = params.population_size;
    let elite_count = params.selection.elite_count(population_size);

    let mut population: Vec<Strategy> = (0..population_size)
        .map(|_| Strategy::random(&mut rng))
        .collect();

    let mut record = Record {
        best: population[0],
        best_fitness: f64::NEG_INFINITY,
        best_generation: 0,
        best_average: f64::NEG_INFINITY,
        best_average_generation: 0,
    };
    let mut gen_stats = Vec::new();
    let mut generation = 0usize;

    let stop_reason = loop {
        let gen_start = Instant::now();
        evaluate_population(&mut population, fitness, rng.r#gen());

        // First maximum wins ties, so the reported best is stable.
        let mut best_index = 0;
        for (index, individual) in population.iter().enumerate().skip(1) {
            if individual.fitness > population[best_index].fitness {
                best_index = index;
            }
        }
        let best_this_gen = population[best_index].fitness;
        if best_this_gen > record.best_fitness {
            record.best = population[best_index];
            record.best_fitness = best_this_gen;
            record.best_generation = generation;
        }

        let fitness_values: Vec<f64> = population.iter().map(|s| s.fitness).collect();
        let stats = SelectionStats::from_fitness(&fitness_values);
        if stats.mean_fitness > record.best_average {
            record.best_average = stats.mean_fitness;
            record.best_average_generation = generation;
        }

        let generation_time = gen_start.elapsed();
        gen_stats.push(GenerationStats {
            generation,
            best_fitness: best_this_gen,
            mean_fitness: stats.mean_fitness,
            fitness_std: stats.fitness_std,
            best_so_far: record.best_fitness,
            seconds: generation_time.as_secs_f64(),
        });

        let report = EngineProgress {
            generation,
            best_fitness_this_gen: best_this_gen,
            avg_fitness_this_gen: stats.mean_fitness,
            best_fitness_so_far: record.best_fitness,
            generation_time,
        };
        if !progress(&report, &population[best_index]) {
            break StopReason::Cancelled;
        }

        if generation >= params.min_generations {
            if record.is_stagnant(generation, params.max_stagnant_generations) {
                break StopReason::Stagnated;
            }
            if generation >= params.max_generations {
                break StopReason::MaxGenerations;
            }
        }

        let total = prepare_for_selection(&mut population, &params.selection);

        let mut next: Vec<Strategy> = population.iter().take(elite_count).copied().collect();
        if elite_count > 0 && record.best_generation != generation {
            next.push(record.best);
        }
        next.truncate(population_size);

        let breed_seed: u64 = rng.r#gen();
        let parents = &population;
        let children: Vec<Strategy> = (0..population_size - next.len())
            .into_par_iter()
            .map(|index| {
                let mut rng = task_rng(breed_seed, index as u64);
                let a = select_parent(parents, &params.selection, total, &mut rng);
                let b = select_parent(parents, &params.selection, total, &mut rng);
                let mut child = crossover(&parents[a], &parents[b], &params.crossover, &mut rng);
                if rng.gen_bool(params.mutation.rate) {
                    mutate(&mut child, params.mutation.impact, &mut rng);
                }
                child
            })
            .collect();
        next.extend(children);

        population = next;
        generation += 1;
    };

    let stats = EvolutionStats {
        generations: gen_stats,
        best_fitness: record.best_fitness,
        best_generation: record.best_generation,
        best_average_fitness: record.best_average,
        best_average_generation: record.best_average_generation,
        generations_run: generation + 1,
        stop_reason,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    };

    Ok((record.best, stats))
}
