// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Blackjack-evolve: genetic search for table-based Blackjack strategies.
//!
//! This crate provides:
//! - A Blackjack simulator that scores any [`game::Policy`] in net chips
//! - A strategy genome of three dense decision tables
//! - A parallel genetic algorithm that evolves those tables
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Evolution Engine (gp)           │
//! ├─────────────────────────────────────┤
//! │   Strategy Genome │ Book Baseline   │
//! ├─────────────────────────────────────┤
//! │     Blackjack Simulator (game)      │
//! ├─────────────────────────────────────┤
//! │       Cards, Hands and Shoe         │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod gp;
pub mod rng;

pub use error::ConfigError;

// Re-export key types at crate root for convenience
pub use game::{Action, Card, Hand, Policy, Rank, Shoe, Simulator, Statistics, Suit, TestConditions};
pub use gp::{BookStrategy, EngineParameters, EngineProgress, EvolutionStats, Strategy, evolve};
