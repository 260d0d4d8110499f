//! The published basic strategy, used as a baseline for evolved strategies.

use crate::game::{Action, Card, Hand, Policy, RANK_CLASSES, Rank};
use crate::gp::genome::Strategy;

const S: Action = Action::Stand;
const H: Action = Action::Hit;
const D: Action = Action::Double;
const P: Action = Action::Split;

/// One row per holding; columns are dealer upcards 2, 3, .., 9, T, A.
type Row = [Action; RANK_CLASSES];

/// Hard totals not listed stand.
const HARD_ROWS: [(u8, Row); 12] = [
    (16, [S, S, S, S, S, H, H, H, H, H]),
    (15, [S, S, S, S, S, H, H, H, H, H]),
    (14, [S, S, S, S, S, H, H, H, H, H]),
    (13, [S, S, S, S, S, H, H, H, H, H]),
    (12, [H, H, S, S, S, H, H, H, H, H]),
    (11, [D, D, D, D, D, D, D, D, D, D]),
    (10, [D, D, D, D, D, D, D, D, H, H]),
    (9, [H, D, D, D, D, H, H, H, H, H]),
    (8, [H, H, H, H, H, H, H, H, H, H]),
    (7, [H, H, H, H, H, H, H, H, H, H]),
    (6, [H, H, H, H, H, H, H, H, H, H]),
    (5, [H, H, H, H, H, H, H, H, H, H]),
];

/// Soft remainders not listed (A-9) stand.
const SOFT_ROWS: [(u8, Row); 7] = [
    (8, [S, S, S, S, D, S, S, S, S, S]),
    (7, [D, D, D, D, D, S, S, H, H, H]),
    (6, [H, D, D, D, D, H, H, H, H, H]),
    (5, [H, H, D, D, D, H, H, H, H, H]),
    (4, [H, H, D, D, D, H, H, H, H, H]),
    (3, [H, H, H, D, D, H, H, H, H, H]),
    (2, [H, H, H, D, D, H, H, H, H, H]),
];

const PAIR_ROWS: [(Rank, Row); 10] = [
    (Rank::Ace, [P, P, P, P, P, P, P, P, P, P]),
    (Rank::Ten, [S, S, S, S, S, S, S, S, S, S]),
    (Rank::Nine, [P, P, P, P, P, S, P, P, S, S]),
    (Rank::Eight, [P, P, P, P, P, P, P, P, P, P]),
    (Rank::Seven, [P, P, P, P, P, P, H, H, H, H]),
    (Rank::Six, [P, P, P, P, P, H, H, H, H, H]),
    (Rank::Five, [D, D, D, D, D, D, D, D, H, H]),
    (Rank::Four, [H, H, H, P, P, H, H, H, H, H]),
    (Rank::Three, [P, P, P, P, P, P, H, H, H, H]),
    (Rank::Two, [P, P, P, P, P, P, H, H, H, H]),
];

/// Hand-authored basic strategy.
///
/// Scored with the same simulator as evolved strategies so results can be
/// compared directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookStrategy {
    table: Strategy,
}

impl Default for BookStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStrategy {
    /// Load the book tables.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Strategy::new();
        for (column, upcard) in Rank::CLASSES.into_iter().enumerate() {
            for (total, row) in HARD_ROWS {
                table.set_hard_action(upcard, total, row[column]);
            }
            for (remainder, row) in SOFT_ROWS {
                table.set_soft_action(upcard, remainder, row[column]);
            }
            for (pair, row) in PAIR_ROWS {
                table.set_pair_action(upcard, pair, row[column]);
            }
        }
        Self { table }
    }

    /// The book tables as a strategy genome, for rendering or seeding.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.table
    }
}

impl Policy for BookStrategy {
    fn action_for_hand(&self, hand: &Hand, dealer_upcard: Card) -> Action {
        self.table.action_for_hand(hand, dealer_upcard)
    }
}
