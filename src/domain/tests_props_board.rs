//! Property-based tests for shuffling and board legality.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::board::{position_of, Board};
use crate::domain::cards::{is_adjacent, Card, Suit, ANCHOR_VALUE};
use crate::domain::deck::{create_deck, deal_cards, shuffle_deck};
use crate::domain::test_gens;

fn anchors() -> Vec<Card> {
    Suit::ALL
        .iter()
        .map(|&suit| Card {
            suit,
            value: ANCHOR_VALUE,
        })
        .collect()
}

proptest! {
    /// Shuffling never duplicates or loses cards, for any seed.
    #[test]
    fn prop_shuffle_preserves_multiset(seed in any::<u64>()) {
        let mut deck = create_deck();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffle_deck(&mut deck, &mut rng);

        prop_assert_eq!(deck.len(), 52);
        let ids: HashSet<String> = deck.iter().map(Card::id).collect();
        prop_assert_eq!(ids.len(), 52);
    }

    /// Dealing conserves cards: anchors + dealt + dropped remainder == 52.
    #[test]
    fn prop_deal_conserves_cards(seed in any::<u64>(), num_players in 2usize..=4) {
        let deck = create_deck();
        let mut rng = StdRng::seed_from_u64(seed);
        let deal = deal_cards(&deck, num_players, &mut rng).unwrap();

        let dealt: usize = deal.hands.iter().map(Vec::len).sum();
        prop_assert_eq!(deal.anchors.len(), 4);
        prop_assert_eq!(dealt, 48 - 48 % num_players);
    }

    /// Every legal move is adjacent to a non-isolated board card of the same
    /// suit, and its own position is free.
    #[test]
    fn prop_legal_moves_are_sound(hand in test_gens::unique_hand_up_to(12)) {
        let mut board = Board::with_anchors(&anchors());
        // Grow a small arbitrary frontier from the hand itself so isolation
        // has something to bite on.
        for &card in hand.iter().take(3) {
            if board.is_playable(card) {
                board.place(card, false);
            }
        }

        for card in board.legal_moves(&hand) {
            prop_assert!(!board.is_occupied(position_of(card)));
            prop_assert!(board.cards().iter().any(
                |bc| !bc.isolated && is_adjacent(card, bc.card)
            ));
        }
    }

    /// Legal move symmetry: after playing (s, v) against its neighbor, the
    /// next card outward (s, v+-1) becomes playable unless occupied.
    #[test]
    fn prop_playing_extends_outward(suit in test_gens::suit(), step in 0u8..5) {
        let mut board = Board::with_anchors(&anchors());
        // Build the chain 8..8+step upward from the anchor.
        for value in 8..=(8 + step) {
            let card = Card { suit, value };
            prop_assert!(board.is_playable(card), "chain card {} must be playable", card);
            board.place(card, false);
        }
        let next = 9 + step;
        if next <= 13 {
            let next_card = Card { suit, value: next };
            prop_assert!(board.is_playable(next_card));
        }
    }
}
