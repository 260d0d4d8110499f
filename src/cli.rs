//! CLI command implementations for bjevolve.

pub(crate) mod evolve;
pub(crate) mod score;
pub(crate) mod settings;
pub(crate) mod show;

mod output;

use blackjack_evolve::ConfigError;
use blackjack_evolve::gp::{EvolutionError, PersistenceError, SavedStrategy, load_strategy};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `evolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EvolveFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// Per-generation CSV.
    Csv,
}

/// Output format for the `score` and `show` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(format!("invalid configuration: {e}"))
    }
}

impl From<EvolutionError> for CliError {
    fn from(e: EvolutionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PersistenceError> for CliError {
    fn from(e: PersistenceError) -> Self {
        Self::new(e.to_string())
    }
}

/// Size the global rayon pool.
pub(crate) fn configure_threads(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }
}

/// Load a saved strategy, naming the file on failure.
pub(crate) fn load_saved(path: &Path) -> Result<SavedStrategy, CliError> {
    load_strategy(path).map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))
}
