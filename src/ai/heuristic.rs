//! Heuristic bot - scores each legal card and plays the best one.
//!
//! The scoring is deliberately simple and fully deterministic:
//! - prefer suits the bot holds few cards of, so scarce cards are not
//!   stranded when the chain stops growing
//! - prefer values far from 7, since extreme cards have only one neighbor
//!   and get harder to place the longer they are held
//! - penalize "bridge" plays that open an outward slot the bot cannot fill
//!   itself, since those mostly unblock opponents

use std::collections::HashMap;

use super::trait_def::{BotError, BotPlayer, BotView};
use crate::domain::{Card, Suit, ANCHOR_VALUE, MAX_VALUE, MIN_VALUE};

const SCARCITY_WEIGHT: i32 = 40;
const DISTANCE_WEIGHT: i32 = 10;
const BRIDGE_PENALTY: i32 = 15;

pub struct HeuristicBot;

impl HeuristicBot {
    pub const NAME: &'static str = "heuristic";

    pub fn new() -> Self {
        HeuristicBot
    }

    fn score(card: Card, suit_counts: &HashMap<Suit, i32>, hand: &[Card]) -> i32 {
        let in_suit = suit_counts.get(&card.suit).copied().unwrap_or(1).max(1);
        let scarcity = SCARCITY_WEIGHT / in_suit;

        let distance = i32::from(card.value.abs_diff(ANCHOR_VALUE)) * DISTANCE_WEIGHT;

        // The outward neighbor is the card this play makes placeable.
        let outward = if card.value > ANCHOR_VALUE {
            (card.value < MAX_VALUE).then(|| card.value + 1)
        } else {
            (card.value > MIN_VALUE).then(|| card.value - 1)
        };
        let bridges_for_opponent = outward.is_some_and(|v| {
            !hand
                .iter()
                .any(|held| held.suit == card.suit && held.value == v)
        });
        let penalty = if bridges_for_opponent {
            BRIDGE_PENALTY
        } else {
            0
        };

        scarcity + distance - penalty
    }
}

impl Default for HeuristicBot {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPlayer for HeuristicBot {
    fn choose_card(&self, view: &BotView<'_>) -> Result<Card, BotError> {
        if view.legal_moves.is_empty() {
            return Err(BotError::NoLegalMoves);
        }

        let mut suit_counts: HashMap<Suit, i32> = HashMap::new();
        for card in view.hand {
            *suit_counts.entry(card.suit).or_insert(0) += 1;
        }

        // Ties break on card ordering so the choice is stable across runs.
        view.legal_moves
            .iter()
            .copied()
            .max_by(|a, b| {
                Self::score(*a, &suit_counts, view.hand)
                    .cmp(&Self::score(*b, &suit_counts, view.hand))
                    .then_with(|| b.cmp(a))
            })
            .ok_or_else(|| BotError::Internal("no card scored".into()))
    }
}
