//! Mutation operator for strategy genomes.
//!
//! Mutation redraws randomly chosen cells in each table. The number of cells
//! touched per table is proportional to the table's size, so an impact of 0.1
//! redraws roughly a tenth of every table.

// Mutation uses intentional casts to turn impact into cell counts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::error::{ConfigError, check_rate};
use crate::game::{Action, RANK_CLASSES};
use crate::gp::genome::{HARD_CELLS, SOFT_CELLS, Strategy};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Probability that a newly bred child is mutated.
    pub rate: f64,
    /// Proportion of each table redrawn when a child is mutated.
    pub impact: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.15,
            impact: 0.1,
        }
    }
}

impl MutationConfig {
    /// Check both values lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first value out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("mutation_rate", self.rate)?;
        check_rate("mutation_impact", self.impact)
    }
}

/// Number of redraws for a table of `cells` cells at `impact`.
fn redraws(cells: usize, impact: f64) -> usize {
    (cells as f64 * impact) as usize
}

/// Redraw random cells of every table in place.
///
/// Cells are picked with replacement, so a cell may be redrawn twice and a
/// redraw may land on the value it already had.
pub fn mutate<R: Rng>(strategy: &mut Strategy, impact: f64, rng: &mut R) {
    for _ in 0..redraws(RANK_CLASSES * RANK_CLASSES, impact) {
        let upcard = rng.gen_range(0..RANK_CLASSES);
        let pair = rng.gen_range(0..RANK_CLASSES);
        strategy.pairs[upcard][pair] = Action::random(rng, true);
    }

    for _ in 0..redraws(RANK_CLASSES * SOFT_CELLS, impact) {
        let upcard = rng.gen_range(0..RANK_CLASSES);
        let remainder = rng.gen_range(0..SOFT_CELLS);
        strategy.soft[upcard][remainder] = Action::random(rng, false);
    }

    for _ in 0..redraws(RANK_CLASSES * HARD_CELLS, impact) {
        let upcard = rng.gen_range(0..RANK_CLASSES);
        let total = rng.gen_range(0..HARD_CELLS);
        strategy.hard[upcard][total] = Action::random(rng, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn differing_cells(a: &Strategy, b: &Strategy) -> usize {
        let pairs = a.pairs.iter().flatten().zip(b.pairs.iter().flatten());
        let soft = a.soft.iter().flatten().zip(b.soft.iter().flatten());
        let hard = a.hard.iter().flatten().zip(b.hard.iter().flatten());
        pairs.chain(soft).chain(hard).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_zero_impact_is_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let original = Strategy::random(&mut rng);
        let mut mutated = original;
        mutate(&mut mutated, 0.0, &mut rng);
        assert_eq!(original, mutated);
    }

    #[test]
    fn test_mutation_bounded_by_impact() {
        let mut rng = SmallRng::seed_from_u64(2);
        let original = Strategy::random(&mut rng);
        let mut mutated = original;
        mutate(&mut mutated, 0.1, &mut rng);

        let changed = differing_cells(&original, &mutated);
        assert!(changed <= 10 + 8 + 16);
        assert!(changed > 0);
    }

    #[test]
    fn test_mutation_keeps_split_in_pair_table() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut strategy = Strategy::new();
        for _ in 0..20 {
            mutate(&mut strategy, 1.0, &mut rng);
        }
        assert!(strategy.soft.iter().flatten().all(|&a| a != Action::Split));
        assert!(strategy.hard.iter().flatten().all(|&a| a != Action::Split));
        assert!(strategy.pairs.iter().flatten().any(|&a| a == Action::Split));
    }

    #[test]
    fn test_mutating_clone_leaves_original() {
        let mut rng = SmallRng::seed_from_u64(4);
        let original = Strategy::random(&mut rng);
        let snapshot = original;
        let mut clone = original;
        mutate(&mut clone, 0.5, &mut rng);
        assert_eq!(original, snapshot);
        assert_ne!(original, clone);
    }

    #[test]
    fn test_validate() {
        assert!(MutationConfig::default().validate().is_ok());
        let bad = MutationConfig {
            rate: 0.1,
            impact: 2.0,
        };
        assert!(bad.validate().is_err());
    }
}
