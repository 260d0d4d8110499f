//! Game layer: cards, the shoe, and the Blackjack simulator.
//!
//! Implements the table rules used to score strategies:
//! - Cards, hands and a multi-deck shoe with deck-stacking controls
//! - The `Policy` capability any strategy exposes
//! - The round-by-round simulator and repeated-run statistics

mod action;
mod card;
mod conditions;
mod hand;
mod shoe;
mod simulator;
mod statistics;

pub use action::{Action, Policy};
pub use card::{Card, RANK_CLASSES, Rank, Suit};
pub use conditions::TestConditions;
pub use hand::{BLACKJACK, Hand};
pub use shoe::{DECK_SIZE, RESHUFFLE_THRESHOLD, Shoe};
pub use simulator::{DEALER_STANDS_AT, MAX_HANDS_PER_ROUND, Simulator};
pub use statistics::Statistics;
