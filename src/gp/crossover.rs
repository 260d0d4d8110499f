//! Crossover operator for strategy genomes.
//!
//! Crossover is uniform and per cell: every cell of the child is taken from
//! the first parent with probability `p`, otherwise from the second. `p` leans
//! toward the fitter parent.

use crate::gp::genome::Strategy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest mixing ratio when clamping is enabled.
pub const MIN_MIX_RATIO: f64 = 0.2;
/// Largest mixing ratio when clamping is enabled.
pub const MAX_MIX_RATIO: f64 = 0.8;

/// Bias toward the non-negative parent when the other scored below zero.
const MIXED_SIGN_BIAS: f64 = 0.8;

/// Combined fitness below which both parents count as equal.
const NEAR_ZERO_TOTAL: f64 = 0.001;

/// Configuration for crossover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Clamp the mixing ratio into `[0.2, 0.8]` so a child always inherits
    /// from both parents, even under extreme fitness skew.
    pub clamp_mix_ratio: bool,
}

/// Probability that a child cell is taken from parent A.
///
/// - both non-negative: `fa / (fa + fb)`, or 0.5 when both are near zero
/// - mixed signs: 0.8 toward the non-negative parent
/// - both negative: `1 - |fa| / (|fa| + |fb|)`
#[must_use]
pub fn mix_ratio(fitness_a: f64, fitness_b: f64, clamp: bool) -> f64 {
    let p = match (fitness_a >= 0.0, fitness_b >= 0.0) {
        (true, true) => {
            let total = fitness_a + fitness_b;
            if total < NEAR_ZERO_TOTAL {
                0.5
            } else {
                fitness_a / total
            }
        }
        (true, false) => MIXED_SIGN_BIAS,
        (false, true) => 1.0 - MIXED_SIGN_BIAS,
        (false, false) => {
            let (a, b) = (fitness_a.abs(), fitness_b.abs());
            1.0 - a / (a + b)
        }
    };

    if clamp {
        p.clamp(MIN_MIX_RATIO, MAX_MIX_RATIO)
    } else {
        p
    }
}

/// Breed a child from two evaluated parents.
///
/// The child's fitness is zero until it is evaluated.
#[must_use]
pub fn crossover<R: Rng>(
    parent_a: &Strategy,
    parent_b: &Strategy,
    config: &CrossoverConfig,
    rng: &mut R,
) -> Strategy {
    let p = mix_ratio(parent_a.fitness, parent_b.fitness, config.clamp_mix_ratio);
    let mut child = *parent_b;
    child.fitness = 0.0;

    for (dst, src) in child.pairs.iter_mut().flatten().zip(parent_a.pairs.iter().flatten()) {
        if rng.gen_bool(p) {
            *dst = *src;
        }
    }
    for (dst, src) in child.soft.iter_mut().flatten().zip(parent_a.soft.iter().flatten()) {
        if rng.gen_bool(p) {
            *dst = *src;
        }
    }
    for (dst, src) in child.hard.iter_mut().flatten().zip(parent_a.hard.iter().flatten()) {
        if rng.gen_bool(p) {
            *dst = *src;
        }
    }

    child
}
