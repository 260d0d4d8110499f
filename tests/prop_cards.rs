//! Property-based tests for hands, the shoe and strategy operators.
//!
//! Run with: cargo test --release prop_cards

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use blackjack_evolve::game::{Action, Card, DECK_SIZE, Hand, Rank, Shoe, Suit};
use blackjack_evolve::gp::{CrossoverConfig, Strategy as Table, crossover, mix_ratio, mutate};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn rank_strategy() -> impl Strategy<Value = Rank> {
    (0..Rank::ALL.len()).prop_map(|i| Rank::ALL[i])
}

fn hand_strategy() -> impl Strategy<Value = Vec<Rank>> {
    prop::collection::vec(rank_strategy(), 1..12)
}

fn build_hand(ranks: &[Rank]) -> Hand {
    let cards: Vec<Card> = ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect();
    Hand::from_cards(&cards)
}

/// Best total of at most 21 by brute force over every Ace assignment.
fn best_total(ranks: &[Rank]) -> u32 {
    let low: u32 = ranks.iter().map(|r| u32::from(r.value_low())).sum();
    let aces = u32::try_from(ranks.iter().filter(|&&r| r == Rank::Ace).count()).unwrap();
    (0..=aces)
        .map(|high| low + 10 * high)
        .filter(|&t| t <= 21)
        .max()
        .unwrap_or(low)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Hand value is the best total of at most 21, or the low total if bust.
    #[test]
    fn prop_hand_value_is_best_total(ranks in hand_strategy()) {
        let hand = build_hand(&ranks);
        prop_assert_eq!(u32::from(hand.value()), best_total(&ranks));
        prop_assert_eq!(hand.is_bust(), hand.value() > 21);
    }

    /// A soft hand always holds an Ace and never exceeds 21.
    #[test]
    fn prop_soft_hands_hold_an_ace(ranks in hand_strategy()) {
        let hand = build_hand(&ranks);
        if hand.has_soft_ace() {
            prop_assert!(ranks.contains(&Rank::Ace));
            prop_assert!(hand.value() <= 21);
        }
    }

    /// Only two cards of the same rank make a pair.
    #[test]
    fn prop_pairs_are_two_equal_ranks(ranks in hand_strategy()) {
        let hand = build_hand(&ranks);
        prop_assert_eq!(hand.is_pair(), ranks.len() == 2 && ranks[0] == ranks[1]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Forcing and skipping cards keeps the shoe whole and the cursor in
    /// bounds.
    #[test]
    fn prop_shoe_stacking_preserves_composition(
        decks in 1usize..4,
        seed in any::<u64>(),
        deals in 0usize..150,
        forced in rank_strategy(),
        skipped in rank_strategy(),
    ) {
        let mut shoe = Shoe::new(decks, seed);
        for _ in 0..deals {
            shoe.deal_card();
        }
        shoe.force_next_card_to_be(forced);
        prop_assert_eq!(shoe.peek().rank, forced);
        shoe.ensure_next_card_is_not(skipped);
        prop_assert!(shoe.peek().rank != skipped);

        prop_assert_eq!(shoe.len(), decks * DECK_SIZE);
        prop_assert!(shoe.remaining() >= 1 && shoe.remaining() <= shoe.len());
    }

    /// Every child cell comes from one of its parents, in either order.
    #[test]
    fn prop_crossover_cells_come_from_parents(
        seed in any::<u64>(),
        fa in -500.0f64..500.0,
        fb in -500.0f64..500.0,
        clamp in any::<bool>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut a = Table::random(&mut rng);
        let mut b = Table::random(&mut rng);
        a.fitness = fa;
        b.fitness = fb;
        let config = CrossoverConfig { clamp_mix_ratio: clamp };

        for (x, y) in [(&a, &b), (&b, &a)] {
            let child = crossover(x, y, &config, &mut rng);
            for up in Rank::CLASSES {
                for pair in Rank::CLASSES {
                    let c = child.pair_action(up, pair);
                    prop_assert!(c == x.pair_action(up, pair) || c == y.pair_action(up, pair));
                }
                for total in 5..=20 {
                    let c = child.hard_action(up, total);
                    prop_assert!(c == x.hard_action(up, total) || c == y.hard_action(up, total));
                }
                for remainder in 2..=9 {
                    let c = child.soft_action(up, remainder);
                    prop_assert!(c == x.soft_action(up, remainder) || c == y.soft_action(up, remainder));
                }
            }
        }
    }

    /// The mixing ratio is always a probability.
    #[test]
    fn prop_mix_ratio_is_probability(
        fa in -1.0e6f64..1.0e6,
        fb in -1.0e6f64..1.0e6,
        clamp in any::<bool>(),
    ) {
        let p = mix_ratio(fa, fb, clamp);
        prop_assert!((0.0..=1.0).contains(&p));
        if clamp {
            prop_assert!((0.2..=0.8).contains(&p));
        }
    }

    /// Mutating a copy never touches the original, and Split stays in the
    /// pair table.
    #[test]
    fn prop_mutation_is_local(seed in any::<u64>(), impact in 0.0f64..=1.0) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let original = Table::random(&mut rng);
        let snapshot = original;
        let mut copy = original;
        mutate(&mut copy, impact, &mut rng);

        prop_assert_eq!(original, snapshot);
        prop_assert!(!copy.has_misplaced_split());
        for up in Rank::CLASSES {
            for total in 5..=20 {
                prop_assert!(copy.hard_action(up, total) != Action::Split);
            }
        }
    }
}
