//! Blackjack hand simulator used as the fitness function.
//!
//! Each evaluation plays a fixed number of rounds from one shuffled shoe and
//! returns the net chips won or lost. Rounds resolve in a fixed order:
//!
//! 1. Player natural: paid out (or pushed against a dealer 21), round over.
//! 2. Dealer natural: the player's bet is lost, round over.
//! 3. The player plays every hand (including split hands) to completion.
//! 4. If any hand is still live, the dealer draws to 17 and pays or collects.

use crate::error::ConfigError;
use crate::game::action::{Action, Policy};
use crate::game::card::{Card, Rank};
use crate::game::conditions::TestConditions;
use crate::game::hand::{BLACKJACK, Hand};
use crate::game::shoe::Shoe;
use rand::Rng;
use std::cmp::Ordering;

/// Dealer draws while below this total, soft or hard.
pub const DEALER_STANDS_AT: u8 = 17;

/// Most hands a player may hold in one round after splitting.
pub const MAX_HANDS_PER_ROUND: usize = 16;

/// One of the player's hands in a round, with the chips riding on it.
#[derive(Debug)]
struct Seat {
    hand: Hand,
    /// Zero once the hand has busted.
    wager: i64,
}

/// Plays Blackjack rounds against a [`Policy`].
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    conditions: TestConditions,
}

impl Simulator {
    /// Create a simulator for the given conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the conditions are invalid.
    pub fn new(conditions: TestConditions) -> Result<Self, ConfigError> {
        conditions.validate()?;
        Ok(Self { conditions })
    }

    /// The conditions this simulator plays under.
    #[must_use]
    pub fn conditions(&self) -> &TestConditions {
        &self.conditions
    }

    /// Play `hands_per_evaluation` rounds with `policy` and return net chips.
    ///
    /// The shoe is seeded from `rng`, so the score is stochastic across calls
    /// and reproducible for a given generator state.
    ///
    /// # Panics
    ///
    /// Panics if the policy asks to split a hand that is not a pair.
    pub fn score<P, R>(&self, policy: &P, rng: &mut R) -> i64
    where
        P: Policy + ?Sized,
        R: Rng,
    {
        let mut shoe = Shoe::new(self.conditions.num_decks, rng.r#gen());
        let mut chips = 0i64;
        for _ in 0..self.conditions.hands_per_evaluation {
            chips += self.play_round(policy, &mut shoe, rng);
        }
        chips
    }

    /// Play one round and return the net chip change.
    fn play_round<P, R>(&self, policy: &P, shoe: &mut Shoe, rng: &mut R) -> i64
    where
        P: Policy + ?Sized,
        R: Rng,
    {
        let bet = self.conditions.bet_size;

        let mut dealer = Hand::new();
        dealer.push(shoe.deal_card());
        dealer.push(shoe.deal_card());

        let mut player = Hand::new();
        let lead = shoe.deal_card();
        player.push(lead);
        if self.conditions.stack_deck {
            stack_second_card(shoe, lead.rank, rng);
        }
        player.push(shoe.deal_card());

        let mut chips = -bet;

        if player.value() == BLACKJACK {
            return if dealer.value() == BLACKJACK {
                chips + bet
            } else {
                chips + self.conditions.blackjack_payoff
            };
        }
        if dealer.value() == BLACKJACK {
            return chips;
        }

        let upcard = dealer.cards()[0];
        let mut seats = vec![Seat {
            hand: player,
            wager: bet,
        }];

        let mut index = 0;
        while index < seats.len() {
            chips -= self.play_hand(policy, &mut seats, index, upcard, shoe);
            index += 1;
        }

        if seats.iter().all(|s| s.wager == 0) {
            return chips;
        }

        while dealer.value() < DEALER_STANDS_AT {
            dealer.push(shoe.deal_card());
        }
        let dealer_total = dealer.value();

        for seat in seats.iter().filter(|s| s.wager > 0) {
            if dealer_total > BLACKJACK {
                chips += seat.wager * 2;
                continue;
            }
            match seat.hand.value().cmp(&dealer_total) {
                Ordering::Equal => chips += seat.wager,
                Ordering::Greater => chips += seat.wager * 2,
                Ordering::Less => {}
            }
        }

        chips
    }

    /// Play the hand at `index` until it stands or busts.
    ///
    /// Returns the extra chips staked on doubles and splits.
    fn play_hand<P>(
        &self,
        policy: &P,
        seats: &mut Vec<Seat>,
        index: usize,
        upcard: Card,
        shoe: &mut Shoe,
    ) -> i64
    where
        P: Policy + ?Sized,
    {
        let bet = self.conditions.bet_size;
        let mut staked = 0;

        loop {
            let action = {
                let hand = &seats[index].hand;
                let value = hand.value();
                if value > BLACKJACK {
                    seats[index].wager = 0;
                    break;
                }
                if value == BLACKJACK {
                    break;
                }

                match policy.action_for_hand(hand, upcard) {
                    Action::Double if hand.len() > 2 => Action::Hit,
                    Action::Split if seats.len() >= MAX_HANDS_PER_ROUND => Action::Hit,
                    Action::Split => {
                        assert!(hand.is_pair(), "split requested for non-pair hand {hand}");
                        Action::Split
                    }
                    other => other,
                }
            };

            let seat = &mut seats[index];
            match action {
                Action::Stand => break,
                Action::Hit => seat.hand.push(shoe.deal_card()),
                Action::Double => {
                    staked += bet;
                    seat.wager += bet;
                    seat.hand.push(shoe.deal_card());
                    if seat.hand.is_bust() {
                        seat.wager = 0;
                    }
                    break;
                }
                Action::Split => {
                    let moved = seat.hand.replace(1, shoe.deal_card());
                    let mut split = Hand::new();
                    split.push(moved);
                    split.push(shoe.deal_card());
                    seats.push(Seat {
                        hand: split,
                        wager: bet,
                    });
                    staked += bet;
                }
            }
        }

        staked
    }
}

/// Ranks that turn an Ace lead into a pair or a natural.
const NOT_SOFT_WITH_ACE: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

/// Bias the player's second card: a third of the time toward a pair, a third
/// toward a playable soft hand, otherwise leave the shoe alone.
///
/// A ten-group lead cannot make a soft hand below 21, so its soft third is
/// left alone too.
fn stack_second_card<R: Rng>(shoe: &mut Shoe, lead: Rank, rng: &mut R) {
    match rng.gen_range(0..3) {
        0 => {
            shoe.force_next_card_to_be(lead);
        }
        1 if lead == Rank::Ace => shoe.ensure_next_card_is_none_of(&NOT_SOFT_WITH_ACE),
        1 if lead.same_class(Rank::Ten) => {}
        1 => {
            shoe.force_next_card_to_be(Rank::Ace);
        }
        _ => {}
    }
}
