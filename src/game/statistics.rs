//! Repeated-evaluation statistics for judging a finished strategy.

// Statistics use intentional integer-to-float casts
#![allow(clippy::cast_precision_loss)]

use crate::game::action::Policy;
use crate::game::simulator::Simulator;
use crate::rng::task_rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Spread of scores over independent evaluation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Net chips from each run, in run order.
    pub scores: Vec<i64>,
    /// Mean score.
    pub mean: f64,
    /// Population standard deviation of the scores.
    pub std_dev: f64,
    /// `std_dev / mean`. Zero when every score is zero, infinite when the
    /// mean is zero but the scores vary.
    pub coefficient_of_variation: f64,
}

impl Statistics {
    /// Summarize a set of run scores.
    #[must_use]
    pub fn from_scores(scores: Vec<i64>) -> Self {
        if scores.is_empty() {
            return Self {
                scores,
                mean: 0.0,
                std_dev: 0.0,
                coefficient_of_variation: 0.0,
            };
        }

        let n = scores.len() as f64;
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n;
        let variance = scores
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        let coefficient_of_variation = if mean.abs() > f64::EPSILON {
            std_dev / mean
        } else if std_dev > f64::EPSILON {
            f64::INFINITY
        } else {
            0.0
        };

        Self {
            scores,
            mean,
            std_dev,
            coefficient_of_variation,
        }
    }
}

impl Simulator {
    /// Score `policy` over `final_tests` independent runs, in parallel.
    ///
    /// Run `i` draws from its own generator derived from `seed`, so the result
    /// does not depend on thread scheduling.
    ///
    /// # Panics
    ///
    /// Panics if the policy asks to split a hand that is not a pair.
    #[must_use]
    pub fn statistics<P>(&self, policy: &P, seed: u64) -> Statistics
    where
        P: Policy + Sync + ?Sized,
    {
        let scores: Vec<i64> = (0..self.conditions().final_tests as u64)
            .into_par_iter()
            .map(|run| self.score(policy, &mut task_rng(seed, run)))
            .collect();
        Statistics::from_scores(scores)
    }
}
