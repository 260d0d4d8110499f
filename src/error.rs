//! Configuration errors for the engine and the simulator.

use std::fmt;

/// A rejected configuration value.
///
/// Configuration is validated once, before a run starts, so a bad value never
/// surfaces halfway through an evolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Population size must be at least one.
    PopulationSize,
    /// Tournament size must be in `1..=population_size`.
    TourneySize {
        /// Requested tournament size.
        tourney_size: usize,
        /// Configured population size.
        population_size: usize,
    },
    /// Minimum generations exceed maximum generations.
    Generations {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A probability or proportion outside `[0, 1]`.
    Rate {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A shoe needs at least one deck.
    Decks,
    /// An evaluation needs at least one hand.
    HandsPerEvaluation,
    /// Bets must be at least one chip.
    BetSize,
    /// Final statistics need at least one run.
    FinalTests,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PopulationSize => write!(f, "population size must be at least 1"),
            Self::TourneySize {
                tourney_size,
                population_size,
            } => write!(
                f,
                "tournament size {tourney_size} must be between 1 and the population size {population_size}"
            ),
            Self::Generations { min, max } => {
                write!(f, "minimum generations {min} exceed maximum generations {max}")
            }
            Self::Rate { name, value } => write!(f, "{name} must be within [0, 1], got {value}"),
            Self::Decks => write!(f, "the shoe needs at least one deck"),
            Self::HandsPerEvaluation => write!(f, "hands per evaluation must be at least 1"),
            Self::BetSize => write!(f, "bet size must be at least 1 chip"),
            Self::FinalTests => write!(f, "final test count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Check that a rate lies in `[0, 1]`.
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Rate { name, value })
    }
}
