//! Selection operators for the genetic algorithm.
//!
//! Selection decides which individuals become parents. Three styles are
//! supported: tournament, fitness-proportional roulette wheel, and ranked
//! (roulette over rank positions instead of raw scores).

// Selection uses intentional casts for rank substitution and statistics
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::error::{ConfigError, check_rate};
use crate::gp::genome::Strategy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How parents are drawn from the evaluated population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStyle {
    /// Fittest of `tourney_size` random picks.
    #[default]
    Tournament,
    /// Probability proportional to shifted fitness.
    RouletteWheel,
    /// Roulette over rank positions, flattening fitness outliers.
    Ranked,
}

/// Configuration for selection and elitism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Parent selection style.
    pub style: SelectionStyle,
    /// Individuals competing in each tournament.
    pub tourney_size: usize,
    /// Share of the population copied unchanged into the next generation.
    pub elitism_rate: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            style: SelectionStyle::Tournament,
            tourney_size: 5,
            elitism_rate: 0.1,
        }
    }
}

impl SelectionConfig {
    /// Number of elites kept for a population of `population_size`.
    #[must_use]
    pub fn elite_count(&self, population_size: usize) -> usize {
        (self.elitism_rate * population_size as f64).floor() as usize
    }

    /// Check the configuration against a population size.
    ///
    /// # Errors
    ///
    /// Returns an error if the tournament cannot be filled or the elitism
    /// rate is outside `[0, 1]`.
    pub fn validate(&self, population_size: usize) -> Result<(), ConfigError> {
        if self.tourney_size == 0 || self.tourney_size > population_size {
            return Err(ConfigError::TourneySize {
                tourney_size: self.tourney_size,
                population_size,
            });
        }
        check_rate("elitism_rate", self.elitism_rate)
    }

    /// Whether the population must be sorted before selection.
    fn needs_sort(&self) -> bool {
        self.style != SelectionStyle::Tournament || self.elitism_rate > 0.0
    }
}

/// Prepare an evaluated population for drawing parents.
///
/// Sorts best-first when the style or elitism needs it. For ranked
/// selection each fitness is replaced by its rank (N-1 for the best down to
/// 0). For roulette and ranked selection fitness is shifted so the minimum is
/// zero.
///
/// Returns the total fitness for proportional draws (zero for tournaments).
pub fn prepare_for_selection(population: &mut [Strategy], config: &SelectionConfig) -> f64 {
    if config.needs_sort() {
        population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    match config.style {
        SelectionStyle::Tournament => 0.0,
        SelectionStyle::RouletteWheel | SelectionStyle::Ranked => {
            if config.style == SelectionStyle::Ranked {
                let n = population.len();
                for (position, individual) in population.iter_mut().enumerate() {
                    individual.fitness = (n - 1 - position) as f64;
                }
            }
            shift_non_negative(population)
        }
    }
}

/// Shift fitness so the minimum is zero and return the new total.
fn shift_non_negative(population: &mut [Strategy]) -> f64 {
    let min = population
        .iter()
        .map(|s| s.fitness)
        .fold(f64::INFINITY, f64::min);
    if min < 0.0 {
        for individual in population.iter_mut() {
            individual.fitness -= min;
        }
    }
    population.iter().map(|s| s.fitness).sum()
}

/// Draw `k` individuals at random and return the index of the fittest.
///
/// Ties keep the earlier draw.
///
/// # Panics
///
/// Panics if the population is empty.
#[must_use]
pub fn tournament_select<R: Rng>(population: &[Strategy], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best = rng.gen_range(0..n);
    for _ in 1..k.max(1) {
        let candidate = rng.gen_range(0..n);
        if population[candidate].fitness > population[best].fitness {
            best = candidate;
        }
    }
    best
}

/// Fitness-proportional draw over a prepared population.
///
/// A degenerate total (zero, negative or not finite) falls back to a uniform
/// draw.
///
/// # Panics
///
/// Panics if the population is empty.
#[must_use]
pub fn roulette_select<R: Rng>(population: &[Strategy], total: f64, rng: &mut R) -> usize {
    let n = population.len();
    if !total.is_finite() || total <= 0.0 {
        return rng.gen_range(0..n);
    }

    let mut remaining = rng.r#gen::<f64>() * total;
    for (index, individual) in population.iter().enumerate() {
        remaining -= individual.fitness;
        if remaining <= 0.0 {
            return index;
        }
    }
    n - 1
}

/// Draw one parent index using the configured style.
#[must_use]
pub fn select_parent<R: Rng>(
    population: &[Strategy],
    config: &SelectionConfig,
    total: f64,
    rng: &mut R,
) -> usize {
    match config.style {
        SelectionStyle::Tournament => tournament_select(population, config.tourney_size, rng),
        SelectionStyle::RouletteWheel | SelectionStyle::Ranked => {
            roulette_select(population, total, rng)
        }
    }
}

/// Fitness spread of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Population standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let n = fitness.len() as f64;
        let mean = fitness.iter().sum::<f64>() / n;
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn population(fitness: &[f64]) -> Vec<Strategy> {
        fitness
            .iter()
            .map(|&f| Strategy {
                fitness: f,
                ..Strategy::new()
            })
            .collect()
    }

    fn fitness_of(population: &[Strategy]) -> Vec<f64> {
        population.iter().map(|s| s.fitness).collect()
    }

    #[test]
    fn test_tournament_selection_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let pop = population(&[0.1, 0.5, 0.9, 0.2, 0.8]);

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            counts[tournament_select(&pop, 3, &mut rng)] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_tournament_of_one_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(1);
        let pop = population(&[1.0, 100.0]);
        let picks_first = (0..1000)
            .filter(|_| tournament_select(&pop, 1, &mut rng) == 0)
            .count();
        assert!((350..650).contains(&picks_first));
    }

    #[test]
    fn test_prepare_roulette_sorts_and_shifts() {
        let mut pop = population(&[-5.0, 10.0, 0.0]);
        let config = SelectionConfig {
            style: SelectionStyle::RouletteWheel,
            ..Default::default()
        };
        let total = prepare_for_selection(&mut pop, &config);
        assert_eq!(fitness_of(&pop), vec![15.0, 5.0, 0.0]);
        assert!((total - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_prepare_ranked_substitutes_rank() {
        let mut pop = population(&[-500.0, 3.0, 9_000.0, -2.0]);
        let config = SelectionConfig {
            style: SelectionStyle::Ranked,
            ..Default::default()
        };
        let total = prepare_for_selection(&mut pop, &config);
        assert_eq!(fitness_of(&pop), vec![3.0, 2.0, 1.0, 0.0]);
        assert!((total - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_prepare_tournament_without_elitism_keeps_order() {
        let mut pop = population(&[1.0, 3.0, 2.0]);
        let config = SelectionConfig {
            elitism_rate: 0.0,
            ..Default::default()
        };
        let total = prepare_for_selection(&mut pop, &config);
        assert_eq!(fitness_of(&pop), vec![1.0, 3.0, 2.0]);
        assert!(total.abs() < f64::EPSILON);
    }

    #[test]
    fn test_roulette_is_proportional() {
        let mut rng = SmallRng::seed_from_u64(9);
        let pop = population(&[3.0, 1.0, 0.0]);
        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            counts[roulette_select(&pop, 4.0, &mut rng)] += 1;
        }
        assert_eq!(counts[2], 0);
        assert!(counts[0] > counts[1] * 2);
    }

    #[test]
    fn test_roulette_degenerate_total_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(10);
        let pop = population(&[0.0, 0.0, 0.0, 0.0]);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[roulette_select(&pop, 0.0, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_elite_count_floors() {
        let config = SelectionConfig {
            elitism_rate: 0.1,
            ..Default::default()
        };
        assert_eq!(config.elite_count(150), 15);
        assert_eq!(config.elite_count(9), 0);
    }

    #[test]
    fn test_validate() {
        let config = SelectionConfig::default();
        assert!(config.validate(10).is_ok());
        assert_eq!(
            config.validate(3),
            Err(ConfigError::TourneySize {
                tourney_size: 5,
                population_size: 3
            })
        );
    }

    #[test]
    fn test_selection_stats() {
        let stats = SelectionStats::from_fitness(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert!((stats.best_fitness - 5.0).abs() < 0.001);
        assert!((stats.worst_fitness - 1.0).abs() < 0.001);
    }
}
