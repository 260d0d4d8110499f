//! A player's or dealer's hand.

use crate::game::card::{Card, Rank};
use std::fmt;

/// Highest non-busting total.
pub const BLACKJACK: u8 = 21;

/// An ordered sequence of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(6),
        }
    }

    /// Create a hand holding the given cards.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Add a card to the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// The cards in the order they were dealt.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replace the card at `index`, returning the card that was there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn replace(&mut self, index: usize, card: Card) -> Card {
        std::mem::replace(&mut self.cards[index], card)
    }

    /// All-Aces-low total, saturating at `u8::MAX`.
    fn low_total(&self) -> u8 {
        let total: u32 = self.cards.iter().map(|c| u32::from(c.rank.value_low())).sum();
        u8::try_from(total).unwrap_or(u8::MAX)
    }

    fn has_ace(&self) -> bool {
        self.cards.iter().any(|c| c.rank == Rank::Ace)
    }

    /// Best total: one Ace counts as 11 when that does not bust, every other
    /// Ace counts as 1. A busted hand reports its all-low total, saturating
    /// at `u8::MAX`.
    #[must_use]
    pub fn value(&self) -> u8 {
        let low = self.low_total();
        if self.has_ace() && low <= BLACKJACK - 10 {
            low + 10
        } else {
            low
        }
    }

    /// Exactly two cards of the same rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.rank == b.rank)
    }

    /// Holds an Ace that can count as 11 without busting.
    #[must_use]
    pub fn has_soft_ace(&self) -> bool {
        self.has_ace() && self.low_total() <= BLACKJACK - 10
    }

    /// Total of the hand excluding the Ace counted as 11, when the hand is soft.
    #[must_use]
    pub fn soft_remainder(&self) -> Option<u8> {
        self.has_soft_ace().then(|| self.low_total() - 1)
    }

    /// Total above 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Two cards totalling 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, " = {}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::Suit;

    fn hand(ranks: &[Rank]) -> Hand {
        let cards: Vec<Card> = ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect();
        Hand::from_cards(&cards)
    }

    #[test]
    fn test_two_aces_and_nine_is_21() {
        let h = hand(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(h.value(), 21);
        assert!(!h.is_bust());
    }

    #[test]
    fn test_ace_falls_back_to_low() {
        let h = hand(&[Rank::Ace, Rank::Nine, Rank::Five]);
        assert_eq!(h.value(), 15);
        assert!(!h.has_soft_ace());
        assert_eq!(h.soft_remainder(), None);
    }

    #[test]
    fn test_bust_reports_low_total() {
        let h = hand(&[Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(h.value(), 25);
        assert!(h.is_bust());

        let h = hand(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Ace]);
        assert_eq!(h.value(), 22);
    }

    #[test]
    fn test_huge_hand_saturates() {
        let h = hand(&[Rank::King; 30]);
        assert_eq!(h.value(), u8::MAX);
        assert!(h.is_bust());

        let mut with_ace = hand(&[Rank::Queen; 26]);
        with_ace.push(Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(with_ace.value(), u8::MAX);
        assert!(!with_ace.has_soft_ace());
    }

    #[test]
    fn test_is_pair_requires_two_equal_ranks() {
        assert!(hand(&[Rank::Eight, Rank::Eight]).is_pair());
        assert!(!hand(&[Rank::King, Rank::Ten]).is_pair());
        assert!(!hand(&[Rank::Eight, Rank::Eight, Rank::Two]).is_pair());
        assert!(!hand(&[Rank::Eight]).is_pair());
    }

    #[test]
    fn test_soft_remainder() {
        assert_eq!(hand(&[Rank::Ace, Rank::Six]).soft_remainder(), Some(6));
        assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::Four]).soft_remainder(), Some(5));
        assert_eq!(hand(&[Rank::Ace, Rank::Two, Rank::Three]).soft_remainder(), Some(5));
    }

    #[test]
    fn test_natural() {
        assert!(hand(&[Rank::Ace, Rank::Jack]).is_natural());
        assert!(!hand(&[Rank::Seven, Rank::Seven, Rank::Seven]).is_natural());
    }

    #[test]
    fn test_display() {
        let h = hand(&[Rank::Ace, Rank::Six]);
        assert_eq!(h.to_string(), "As,6s = 17");
    }
}
