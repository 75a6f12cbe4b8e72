//! Proptest generators for domain tests.

use proptest::prelude::*;

use crate::domain::cards::{Card, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), 1u8..=13).prop_map(|(suit, value)| Card { suit, value })
}

/// Up to `max` distinct non-anchor cards.
pub fn unique_hand_up_to(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::btree_set(card().prop_filter("no anchors", |c| !c.is_anchor()), 0..=max)
        .prop_map(|set| set.into_iter().collect())
}
