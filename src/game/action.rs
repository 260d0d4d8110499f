//! Player decisions and the policy capability the simulator plays against.

use crate::game::card::Card;
use crate::game::hand::Hand;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the player does with a hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take no more cards.
    #[default]
    Stand,
    /// Take one card.
    Hit,
    /// Double the wager, take exactly one card, then stand.
    Double,
    /// Split a pair into two hands.
    Split,
}

impl Action {
    /// Actions legal for any hand.
    pub const WITHOUT_SPLIT: [Action; 3] = [Action::Stand, Action::Hit, Action::Double];

    /// Actions legal for a starting pair.
    pub const WITH_SPLIT: [Action; 4] = [Action::Stand, Action::Hit, Action::Double, Action::Split];

    /// Uniformly random action; `Split` only when `allow_split` is set.
    pub fn random<R: Rng>(rng: &mut R, allow_split: bool) -> Self {
        if allow_split {
            Self::WITH_SPLIT[rng.gen_range(0..Self::WITH_SPLIT.len())]
        } else {
            Self::WITHOUT_SPLIT[rng.gen_range(0..Self::WITHOUT_SPLIT.len())]
        }
    }

    /// Single-letter label used in rendered tables.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Action::Stand => 'S',
            Action::Hit => 'H',
            Action::Double => 'D',
            Action::Split => 'P',
        }
    }

    /// Parse a single-letter label.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'S' => Some(Action::Stand),
            'H' => Some(Action::Hit),
            'D' => Some(Action::Double),
            'P' => Some(Action::Split),
            _ => None,
        }
    }
}

/// Anything that can decide how to play a hand against a dealer upcard.
///
/// Both evolved strategies and fixed baselines implement this, so either can
/// be scored by the same simulator.
pub trait Policy {
    /// Choose an action for `hand` given the dealer's visible card.
    fn action_for_hand(&self, hand: &Hand, dealer_upcard: Card) -> Action;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn action_for_hand(&self, hand: &Hand, dealer_upcard: Card) -> Action {
        (**self).action_for_hand(hand, dealer_upcard)
    }
}
