//! Playing cards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rank. Discriminants are the pip values, with face cards and the Ace
/// following Ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    /// Two.
    Two = 2,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

/// Number of collapsed rank classes used to index strategy tables.
pub const RANK_CLASSES: usize = 10;

impl Rank {
    /// All thirteen ranks in deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// One representative rank per collapsed class, in class-index order.
    pub const CLASSES: [Rank; RANK_CLASSES] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Ace,
    ];

    /// Scoring value with an Ace counted as 11.
    #[must_use]
    pub fn value_high(self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            pip => pip as u8,
        }
    }

    /// Scoring value with an Ace counted as 1.
    #[must_use]
    pub fn value_low(self) -> u8 {
        match self {
            Rank::Ace => 1,
            other => other.value_high(),
        }
    }

    /// Index of this rank's collapsed class: 2..9 map to 0..7, the ten-group
    /// to 8 and the Ace to 9.
    #[must_use]
    pub fn class_index(self) -> usize {
        match self {
            Rank::Ace => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 8,
            pip => pip as usize - 2,
        }
    }

    /// Whether two ranks fall into the same collapsed class.
    #[must_use]
    pub fn same_class(self, other: Rank) -> bool {
        self.class_index() == other.class_index()
    }

    /// Single-character label (`2`..`9`, `T`, `J`, `Q`, `K`, `A`).
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            pip => char::from(b'0' + pip as u8),
        }
    }
}

/// Card suit. Suits never affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Spades, Suit::Clubs, Suit::Diamonds];

    fn symbol(self) -> char {
        match self {
            Suit::Hearts => 'h',
            Suit::Spades => 's',
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
        }
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// The card's rank.
    pub rank: Rank,
    /// The card's suit.
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}
