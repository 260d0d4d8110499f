#![no_main]

use arbitrary::Arbitrary;
use blackjack_evolve::game::{Action, Rank, Simulator, TestConditions};
use blackjack_evolve::gp::{HIGHEST_HARD_TOTAL, LOWEST_HARD_TOTAL, Strategy};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Arbitrary strategy cells and table conditions.
#[derive(Arbitrary, Debug)]
struct SimulatorInput {
    pairs: Vec<u8>,
    soft: Vec<u8>,
    hard: Vec<u8>,
    decks: u8,
    hands: u16,
    bet: u8,
    payoff: u8,
    stack_deck: bool,
    seed: u64,
}

fn cell(bytes: &[u8], index: usize) -> u8 {
    if bytes.is_empty() { 0 } else { bytes[index % bytes.len()] }
}

fuzz_target!(|input: SimulatorInput| {
    let mut strategy = Strategy::new();
    let mut index = 0;
    for up in Rank::CLASSES {
        for pair in Rank::CLASSES {
            let b = cell(&input.pairs, index);
            strategy.set_pair_action(up, pair, Action::WITH_SPLIT[usize::from(b) % 4]);
            index += 1;
        }
        for remainder in 2..=9 {
            let b = cell(&input.soft, index);
            strategy.set_soft_action(up, remainder, Action::WITHOUT_SPLIT[usize::from(b) % 3]);
            index += 1;
        }
        for total in LOWEST_HARD_TOTAL..=HIGHEST_HARD_TOTAL {
            let b = cell(&input.hard, index);
            strategy.set_hard_action(up, total, Action::WITHOUT_SPLIT[usize::from(b) % 3]);
            index += 1;
        }
    }

    let bet = i64::from(input.bet % 10) + 1;
    let conditions = TestConditions {
        num_decks: usize::from(input.decks % 8) + 1,
        hands_per_evaluation: usize::from(input.hands % 2_000),
        bet_size: bet,
        blackjack_payoff: i64::from(input.payoff % 10),
        final_tests: 1,
        stack_deck: input.stack_deck,
    };
    let Ok(simulator) = Simulator::new(conditions) else {
        return;
    };

    let mut rng = SmallRng::seed_from_u64(input.seed);
    let chips = simulator.score(&strategy, &mut rng);

    // A round risks at most one doubled bet on each of the split hands.
    let worst = 2 * bet * 16 * conditions.hands_per_evaluation as i64;
    assert!(chips.abs() <= worst.max(10 * conditions.hands_per_evaluation as i64));
});
