//! Genetic algorithm for evolving Blackjack strategy tables.
//!
//! A strategy is three dense decision tables. The engine scores a population
//! of strategies with the simulator, then breeds the next generation with
//! selection, elitism, uniform crossover and mutation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │   Fitness Evaluation (parallel)     │
//! ├─────────────────────────────────────┤
//! │        Blackjack Simulator          │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use blackjack_evolve::game::{Simulator, TestConditions};
//! use blackjack_evolve::gp::{EngineParameters, evolve, simulator_fitness};
//!
//! let simulator = Simulator::new(TestConditions::default())?;
//! let fitness = simulator_fitness(simulator);
//! let (best, stats) = evolve(&EngineParameters::default(), &fitness, |_, _| true)?;
//! println!("best {} after {} generations", best.fitness, stats.generations_run);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod book;
mod crossover;
mod evolution;
mod fitness;
mod genome;
mod mutation;
mod persistence;
mod selection;

pub use book::BookStrategy;
pub use crossover::{CrossoverConfig, MAX_MIX_RATIO, MIN_MIX_RATIO, crossover, mix_ratio};
pub use evolution::{
    EngineParameters, EngineProgress, EvolutionError, EvolutionStats, GenerationStats, StopReason,
    evolve,
};
pub use fitness::{evaluate_population, simulator_fitness};
pub use genome::{
    HARD_CELLS, HIGHEST_HARD_TOTAL, HIGHEST_SOFT_REMAINDER, LOWEST_HARD_TOTAL,
    LOWEST_SOFT_REMAINDER, SOFT_CELLS, Strategy,
};
pub use mutation::{MutationConfig, mutate};
pub use persistence::{
    FORMAT_VERSION, PersistenceError, SavedStrategy, load_strategy, save_strategy,
};
pub use selection::{
    SelectionConfig, SelectionStats, SelectionStyle, prepare_for_selection, roulette_select,
    select_parent, tournament_select,
};
