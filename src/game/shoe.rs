//! Multi-deck shoe with automatic reshuffle and deck-stacking controls.

use crate::game::card::{Card, Rank, Suit};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Cards in one deck.
pub const DECK_SIZE: usize = 52;

/// The shoe reshuffles before dealing once fewer cards than this remain.
pub const RESHUFFLE_THRESHOLD: usize = 20;

/// A shuffled sequence of `num_decks` full decks with a deal cursor.
///
/// Each shoe owns its own generator, so concurrent evaluations never share
/// random state.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    next: usize,
    rng: SmallRng,
}

impl Shoe {
    /// Create a freshly shuffled shoe.
    ///
    /// # Panics
    ///
    /// Panics if `num_decks` is zero.
    #[must_use]
    pub fn new(num_decks: usize, seed: u64) -> Self {
        assert!(num_decks > 0, "a shoe needs at least one deck");

        let mut cards = Vec::with_capacity(num_decks * DECK_SIZE);
        for _ in 0..num_decks {
            for rank in Rank::ALL {
                for suit in Suit::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }

        let mut shoe = Self {
            cards,
            next: 0,
            rng: SmallRng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// Total number of cards in the shoe, dealt or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the shoe holds no cards at all. Never true for a constructed shoe.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left before the cursor reaches the end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// The card that will be dealt next, without dealing it.
    #[must_use]
    pub fn peek(&self) -> Card {
        self.cards[self.next]
    }

    /// Fisher-Yates shuffle of the whole shoe; resets the cursor.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.next = 0;
    }

    fn shuffle_if_needed(&mut self) {
        if self.remaining() < RESHUFFLE_THRESHOLD {
            self.shuffle();
        }
    }

    /// Deal the next card, reshuffling first when the shoe runs low.
    pub fn deal_card(&mut self) -> Card {
        self.shuffle_if_needed();
        let card = self.cards[self.next];
        self.next += 1;
        card
    }

    /// Make the next dealt card one of `rank`.
    ///
    /// The first matching card after the cursor is swapped into the next
    /// position; if none remains, the search wraps to the already-dealt part
    /// of the shoe. Returns `false` if the shoe holds no card of that rank.
    pub fn force_next_card_to_be(&mut self, rank: Rank) -> bool {
        self.shuffle_if_needed();

        let found = self.cards[self.next..]
            .iter()
            .position(|c| c.rank == rank)
            .map(|i| i + self.next)
            .or_else(|| self.cards[..self.next].iter().position(|c| c.rank == rank));

        match found {
            Some(pos) => {
                self.cards.swap(pos, self.next);
                true
            }
            None => false,
        }
    }

    /// Skip past cards of `rank` so the next dealt card is something else.
    ///
    /// Skipped cards count as dealt; the shoe reshuffles as usual if it runs low.
    pub fn ensure_next_card_is_not(&mut self, rank: Rank) {
        self.ensure_next_card_is_none_of(&[rank]);
    }

    /// Skip past cards of any rank in `ranks`.
    ///
    /// # Panics
    ///
    /// Panics if `ranks` excludes every rank.
    pub fn ensure_next_card_is_none_of(&mut self, ranks: &[Rank]) {
        assert!(
            Rank::ALL.iter().any(|r| !ranks.contains(r)),
            "cannot exclude every rank"
        );
        self.shuffle_if_needed();
        while ranks.contains(&self.cards[self.next].rank) {
            self.next += 1;
            self.shuffle_if_needed();
        }
    }

    /// Arrange the next cards to be dealt as `ranks`, in order.
    #[cfg(test)]
    pub(crate) fn stack(&mut self, ranks: &[Rank]) {
        for (offset, &rank) in ranks.iter().enumerate() {
            let at = self.next + offset;
            let pos = self.cards[at..]
                .iter()
                .position(|c| c.rank == rank)
                .unwrap_or_else(|| panic!("no {rank:?} left to stack"));
            self.cards.swap(at, at + pos);
        }
    }
}
