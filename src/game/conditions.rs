//! Table conditions for fitness evaluation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How a strategy is tested: shoe size, hands per evaluation, stakes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConditions {
    /// Decks in the shoe.
    pub num_decks: usize,
    /// Hands played per fitness evaluation.
    pub hands_per_evaluation: usize,
    /// Chips wagered per hand (and per split or double).
    pub bet_size: i64,
    /// Chips credited for a natural, per `bet_size` wagered.
    pub blackjack_payoff: i64,
    /// Independent evaluations used for final statistics.
    pub final_tests: usize,
    /// Bias the player's second card toward pairs and soft hands.
    pub stack_deck: bool,
}

impl Default for TestConditions {
    fn default() -> Self {
        Self {
            num_decks: 4,
            hands_per_evaluation: 5_000,
            bet_size: 2,
            blackjack_payoff: 3,
            final_tests: 10,
            stack_deck: false,
        }
    }
}

impl TestConditions {
    /// Reject values the simulator cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_decks == 0 {
            return Err(ConfigError::Decks);
        }
        if self.hands_per_evaluation == 0 {
            return Err(ConfigError::HandsPerEvaluation);
        }
        if self.bet_size < 1 {
            return Err(ConfigError::BetSize);
        }
        if self.final_tests == 0 {
            return Err(ConfigError::FinalTests);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TestConditions::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_shoe() {
        let conditions = TestConditions {
            num_decks: 0,
            ..Default::default()
        };
        assert_eq!(conditions.validate(), Err(ConfigError::Decks));
    }

    #[test]
    fn test_rejects_zero_bet() {
        let conditions = TestConditions {
            bet_size: 0,
            ..Default::default()
        };
        assert_eq!(conditions.validate(), Err(ConfigError::BetSize));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let conditions: TestConditions = serde_json::from_str(r#"{"num_decks": 6}"#).unwrap();
        assert_eq!(conditions.num_decks, 6);
        assert_eq!(conditions.bet_size, 2);
    }
}
