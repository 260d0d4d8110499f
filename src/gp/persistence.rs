//! Persistence for evolved strategies.
//!
//! A finished run is saved as pretty-printed JSON: the best strategy plus
//! the settings and results that produced it. Files carry a format version so
//! stale files are rejected instead of misread.

use crate::game::TestConditions;
use crate::gp::evolution::{EngineParameters, EvolutionStats, StopReason};
use crate::gp::genome::Strategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// A saved strategy with the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStrategy {
    /// Format version, checked on load.
    pub version: u32,
    /// The strategy tables. `strategy.fitness` is the score it evolved with.
    pub strategy: Strategy,
    /// Engine settings of the run.
    pub engine: EngineParameters,
    /// Simulation settings of the run.
    pub conditions: TestConditions,
    /// Generations evaluated.
    pub generations_run: usize,
    /// Generation that produced the strategy.
    pub best_generation: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

impl SavedStrategy {
    /// Bundle a finished run for saving.
    #[must_use]
    pub fn new(
        strategy: Strategy,
        engine: EngineParameters,
        conditions: TestConditions,
        stats: &EvolutionStats,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            strategy,
            engine,
            conditions,
            generations_run: stats.generations_run,
            best_generation: stats.best_generation,
            stop_reason: stats.stop_reason,
        }
    }
}

/// Error while saving or loading a strategy file.
#[derive(Debug)]
pub enum PersistenceError {
    /// File I/O error.
    Io(io::Error),
    /// Malformed JSON.
    Json(serde_json::Error),
    /// File written by an unsupported format version.
    Version(u32),
    /// The soft or hard table holds `Split`, which only pairs can play.
    MisplacedSplit,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "invalid strategy file: {e}"),
            Self::Version(v) => write!(
                f,
                "unsupported strategy file version {v} (expected {FORMAT_VERSION})"
            ),
            Self::MisplacedSplit => write!(f, "strategy splits a hand that is not a pair"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Version(_) | Self::MisplacedSplit => None,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Save a strategy file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_strategy(saved: &SavedStrategy, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, saved)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Load a strategy file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, was
/// written by another format version, or holds a table the simulator cannot
/// play.
pub fn load_strategy(path: &Path) -> Result<SavedStrategy, PersistenceError> {
    let reader = BufReader::new(fs::File::open(path)?);
    let saved: SavedStrategy = serde_json::from_reader(reader)?;
    if saved.version != FORMAT_VERSION {
        return Err(PersistenceError::Version(saved.version));
    }
    if saved.strategy.has_misplaced_split() {
        return Err(PersistenceError::MisplacedSplit);
    }
    Ok(saved)
}
