//! Run settings: a JSON file overlaid with command-line flags.

use super::CliError;
use blackjack_evolve::game::TestConditions;
use blackjack_evolve::gp::{EngineParameters, SelectionStyle};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine and simulation settings for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Genetic algorithm settings.
    pub(crate) engine: EngineParameters,
    /// Simulation settings.
    pub(crate) conditions: TestConditions,
}

impl Settings {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| CliError::new(format!("Invalid settings in {}: {e}", path.display())))
    }

    /// Defaults, or the contents of `path` when given.
    pub(crate) fn load_or_default(path: Option<&Path>) -> Result<Self, CliError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Selection style as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SelectionArg {
    /// Fittest of a random sample.
    Tournament,
    /// Fitness-proportional.
    Roulette,
    /// Proportional to rank.
    Ranked,
}

impl From<SelectionArg> for SelectionStyle {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Tournament => Self::Tournament,
            SelectionArg::Roulette => Self::RouletteWheel,
            SelectionArg::Ranked => Self::Ranked,
        }
    }
}

/// Genetic algorithm overrides.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct EngineArgs {
    /// Population size (default: 150)
    #[arg(short, long)]
    pub(crate) population: Option<usize>,

    /// Individuals per tournament (default: 5)
    #[arg(long)]
    pub(crate) tourney_size: Option<usize>,

    /// Generations always run (default: 25)
    #[arg(long)]
    pub(crate) min_generations: Option<usize>,

    /// Generation limit (default: 250)
    #[arg(long)]
    pub(crate) max_generations: Option<usize>,

    /// Stagnant generations before stopping (default: 16)
    #[arg(long)]
    pub(crate) max_stagnant: Option<usize>,

    /// Parent selection style (default: tournament)
    #[arg(long, value_enum)]
    pub(crate) selection: Option<SelectionArg>,

    /// Share of the population kept as elites (default: 0.1)
    #[arg(long)]
    pub(crate) elitism: Option<f64>,

    /// Probability a child is mutated (default: 0.15)
    #[arg(long)]
    pub(crate) mutation_rate: Option<f64>,

    /// Share of each table redrawn by a mutation (default: 0.1)
    #[arg(long)]
    pub(crate) mutation_impact: Option<f64>,

    /// Clamp the crossover mixing ratio into [0.2, 0.8]
    #[arg(long)]
    pub(crate) clamp_mix_ratio: bool,
}

/// Simulation overrides.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SimulationArgs {
    /// Decks in the shoe (default: 4)
    #[arg(long)]
    pub(crate) decks: Option<usize>,

    /// Hands per fitness evaluation (default: 5000)
    #[arg(long)]
    pub(crate) hands: Option<usize>,

    /// Chips per hand (default: 2)
    #[arg(long)]
    pub(crate) bet: Option<i64>,

    /// Chips credited for a natural (default: 3)
    #[arg(long)]
    pub(crate) payoff: Option<i64>,

    /// Runs used for final statistics (default: 10)
    #[arg(long)]
    pub(crate) final_tests: Option<usize>,

    /// Bias deals toward pairs and soft hands
    #[arg(long)]
    pub(crate) stack_deck: bool,
}

impl EngineArgs {
    /// Overlay the flags that were given.
    pub(crate) fn apply(&self, engine: &mut EngineParameters) {
        if let Some(v) = self.population {
            engine.population_size = v;
        }
        if let Some(v) = self.tourney_size {
            engine.selection.tourney_size = v;
        }
        if let Some(v) = self.min_generations {
            engine.min_generations = v;
        }
        if let Some(v) = self.max_generations {
            engine.max_generations = v;
        }
        if let Some(v) = self.max_stagnant {
            engine.max_stagnant_generations = v;
        }
        if let Some(v) = self.selection {
            engine.selection.style = v.into();
        }
        if let Some(v) = self.elitism {
            engine.selection.elitism_rate = v;
        }
        if let Some(v) = self.mutation_rate {
            engine.mutation.rate = v;
        }
        if let Some(v) = self.mutation_impact {
            engine.mutation.impact = v;
        }
        if self.clamp_mix_ratio {
            engine.crossover.clamp_mix_ratio = true;
        }
    }
}

impl SimulationArgs {
    /// Overlay the flags that were given.
    pub(crate) fn apply(&self, conditions: &mut TestConditions) {
        if let Some(v) = self.decks {
            conditions.num_decks = v;
        }
        if let Some(v) = self.hands {
            conditions.hands_per_evaluation = v;
        }
        if let Some(v) = self.bet {
            conditions.bet_size = v;
        }
        if let Some(v) = self.payoff {
            conditions.blackjack_payoff = v;
        }
        if let Some(v) = self.final_tests {
            conditions.final_tests = v;
        }
        if self.stack_deck {
            conditions.stack_deck = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"engine": {"population_size": 40, "selection": {"style": "ranked"}},
                "conditions": {"num_decks": 6}}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.engine.population_size, 40);
        assert_eq!(settings.engine.selection.style, SelectionStyle::Ranked);
        assert_eq!(settings.engine.selection.tourney_size, 5);
        assert_eq!(settings.conditions.num_decks, 6);
        assert_eq!(settings.conditions.hands_per_evaluation, 5_000);
    }

    #[test]
    fn test_flags_override_file() {
        let mut settings = Settings::default();
        let engine = EngineArgs {
            population: Some(12),
            selection: Some(SelectionArg::Roulette),
            clamp_mix_ratio: true,
            ..Default::default()
        };
        let simulation = SimulationArgs {
            hands: Some(100),
            stack_deck: true,
            ..Default::default()
        };
        engine.apply(&mut settings.engine);
        simulation.apply(&mut settings.conditions);

        assert_eq!(settings.engine.population_size, 12);
        assert_eq!(settings.engine.selection.style, SelectionStyle::RouletteWheel);
        assert!(settings.engine.crossover.clamp_mix_ratio);
        assert_eq!(settings.conditions.hands_per_evaluation, 100);
        assert!(settings.conditions.stack_deck);
        assert_eq!(settings.conditions.num_decks, 4);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(err.to_string().contains("settings.json"));
    }
}
