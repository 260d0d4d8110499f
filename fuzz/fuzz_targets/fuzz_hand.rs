#![no_main]

use arbitrary::Arbitrary;
use blackjack_evolve::game::{BLACKJACK, Card, Hand, Policy, Rank, Suit};
use blackjack_evolve::gp::BookStrategy;
use libfuzzer_sys::fuzz_target;

/// Cards for the player's hand and the dealer's upcard, as rank indices.
#[derive(Arbitrary, Debug)]
struct HandInput {
    ranks: Vec<u8>,
    upcard: u8,
}

fn rank(index: u8) -> Rank {
    Rank::ALL[usize::from(index) % Rank::ALL.len()]
}

fuzz_target!(|input: HandInput| {
    if input.ranks.is_empty() || input.ranks.len() > 24 {
        return;
    }

    let mut hand = Hand::new();
    for &r in &input.ranks {
        hand.push(Card::new(rank(r), Suit::Clubs));
    }

    let low: u32 = hand.cards().iter().map(|c| u32::from(c.rank.value_low())).sum();
    let value = u32::from(hand.value());
    assert!(value >= low, "value {value} below low total {low}");
    assert!(value <= low + 10, "value {value} counts more than one Ace high");
    assert_eq!(hand.is_bust(), hand.value() > BLACKJACK);
    if hand.has_soft_ace() {
        assert!(hand.value() <= BLACKJACK);
        assert!(hand.cards().iter().any(|c| c.rank == Rank::Ace));
    }
    if let Some(remainder) = hand.soft_remainder() {
        assert!((2..=9).contains(&remainder));
    }

    // The baseline table covers every playable hand.
    let upcard = Card::new(rank(input.upcard), Suit::Hearts);
    let action = BookStrategy::new().action_for_hand(&hand, upcard);
    if !hand.is_pair() {
        assert_ne!(action, blackjack_evolve::game::Action::Split);
    }
});
