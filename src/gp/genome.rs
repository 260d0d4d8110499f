//! Strategy genome: three dense decision tables.
//!
//! Every table is indexed first by the dealer upcard's collapsed rank class,
//! then by the player's holding:
//! - pairs: the pair's rank class (10 x 10)
//! - soft hands: the total beside the Ace counted as 11, 2..=9 (10 x 8)
//! - hard hands: the hand total, 5..=20 (10 x 16)
//!
//! Every cell always holds an action (`Stand` by default).

use crate::game::{Action, Card, Hand, Policy, RANK_CLASSES, Rank};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest soft remainder (A-2).
pub const LOWEST_SOFT_REMAINDER: u8 = 2;
/// Highest soft remainder (A-9); A-10 is a natural.
pub const HIGHEST_SOFT_REMAINDER: u8 = 9;
/// Lowest hard total (2-3); 2-2 is a pair.
pub const LOWEST_HARD_TOTAL: u8 = 5;
/// Highest hard total below 21.
pub const HIGHEST_HARD_TOTAL: u8 = 20;

/// Columns in the soft table.
pub const SOFT_CELLS: usize = (HIGHEST_SOFT_REMAINDER - LOWEST_SOFT_REMAINDER + 1) as usize;
/// Columns in the hard table.
pub const HARD_CELLS: usize = (HIGHEST_HARD_TOTAL - LOWEST_HARD_TOTAL + 1) as usize;

pub(crate) type PairTable = [[Action; RANK_CLASSES]; RANK_CLASSES];
pub(crate) type SoftTable = [[Action; SOFT_CELLS]; RANK_CLASSES];
pub(crate) type HardTable = [[Action; HARD_CELLS]; RANK_CLASSES];

/// A complete table-driven playing strategy.
///
/// `fitness` is only meaningful after the strategy has been evaluated in the
/// current generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub(crate) pairs: PairTable,
    pub(crate) soft: SoftTable,
    pub(crate) hard: HardTable,
    /// Score from the most recent evaluation.
    pub fitness: f64,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            pairs: [[Action::Stand; RANK_CLASSES]; RANK_CLASSES],
            soft: [[Action::Stand; SOFT_CELLS]; RANK_CLASSES],
            hard: [[Action::Stand; HARD_CELLS]; RANK_CLASSES],
            fitness: 0.0,
        }
    }
}

impl Strategy {
    /// A strategy that stands on everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy with every cell drawn uniformly at random.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut strategy = Self::default();
        strategy.randomize(rng);
        strategy
    }

    /// Redraw every cell. `Split` only appears in the pair table.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in &mut self.pairs {
            for cell in row {
                *cell = Action::random(rng, true);
            }
        }
        for row in &mut self.soft {
            for cell in row {
                *cell = Action::random(rng, false);
            }
        }
        for row in &mut self.hard {
            for cell in row {
                *cell = Action::random(rng, false);
            }
        }
    }

    /// Action for a pair of `pair` against `upcard`.
    #[must_use]
    pub fn pair_action(&self, upcard: Rank, pair: Rank) -> Action {
        self.pairs[upcard.class_index()][pair.class_index()]
    }

    /// Set the action for a pair of `pair` against `upcard`.
    pub fn set_pair_action(&mut self, upcard: Rank, pair: Rank, action: Action) {
        self.pairs[upcard.class_index()][pair.class_index()] = action;
    }

    /// Action for a soft hand with `remainder` beside the Ace.
    ///
    /// # Panics
    ///
    /// Panics if `remainder` is outside 2..=9.
    #[must_use]
    pub fn soft_action(&self, upcard: Rank, remainder: u8) -> Action {
        self.soft[upcard.class_index()][soft_index(remainder)]
    }

    /// Set the action for a soft hand with `remainder` beside the Ace.
    ///
    /// # Panics
    ///
    /// Panics if `remainder` is outside 2..=9.
    pub fn set_soft_action(&mut self, upcard: Rank, remainder: u8, action: Action) {
        assert!(action != Action::Split, "split is only playable on pairs");
        self.soft[upcard.class_index()][soft_index(remainder)] = action;
    }

    /// Action for a hard `total`.
    ///
    /// # Panics
    ///
    /// Panics if `total` is outside 5..=20.
    #[must_use]
    pub fn hard_action(&self, upcard: Rank, total: u8) -> Action {
        self.hard[upcard.class_index()][hard_index(total)]
    }

    /// Set the action for a hard `total`.
    ///
    /// # Panics
    ///
    /// Panics if `total` is outside 5..=20.
    pub fn set_hard_action(&mut self, upcard: Rank, total: u8, action: Action) {
        assert!(action != Action::Split, "split is only playable on pairs");
        self.hard[upcard.class_index()][hard_index(total)] = action;
    }

    /// Whether `Split` appears outside the pair table.
    ///
    /// Never true for strategies built through this type's methods; checked
    /// when tables come from outside, such as a loaded file.
    #[must_use]
    pub fn has_misplaced_split(&self) -> bool {
        let soft = self.soft.iter().flatten();
        let hard = self.hard.iter().flatten();
        soft.chain(hard).any(|&a| a == Action::Split)
    }

    /// Number of cells across all three tables.
    #[must_use]
    pub const fn cell_count() -> usize {
        RANK_CLASSES * (RANK_CLASSES + SOFT_CELLS + HARD_CELLS)
    }
}

fn soft_index(remainder: u8) -> usize {
    assert!(
        (LOWEST_SOFT_REMAINDER..=HIGHEST_SOFT_REMAINDER).contains(&remainder),
        "soft remainder {remainder} out of range"
    );
    usize::from(remainder - LOWEST_SOFT_REMAINDER)
}

fn hard_index(total: u8) -> usize {
    assert!(
        (LOWEST_HARD_TOTAL..=HIGHEST_HARD_TOTAL).contains(&total),
        "hard total {total} out of range"
    );
    usize::from(total - LOWEST_HARD_TOTAL)
}

impl Policy for Strategy {
    /// Stand on 21 or more; otherwise look the hand up as a pair, then as a
    /// soft hand, then as a hard hand.
    fn action_for_hand(&self, hand: &Hand, dealer_upcard: Card) -> Action {
        let value = hand.value();
        if value >= crate::game::BLACKJACK {
            return Action::Stand;
        }

        let upcard = dealer_upcard.rank;
        if hand.is_pair() {
            return self.pair_action(upcard, hand.cards()[0].rank);
        }
        if let Some(remainder) = hand.soft_remainder() {
            return self.soft_action(upcard, remainder);
        }
        self.hard_action(upcard, value)
    }
}
