//! Deck construction, shuffling and dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards::{Card, Suit, ANCHOR_VALUE, MAX_VALUE, MIN_VALUE};
use crate::errors::domain::GameError;

pub const DECK_SIZE: usize = 52;
pub const MAX_SEATS: usize = 4;

/// Result of a deal: the four value-7 anchors and one hand per player.
#[derive(Debug, Clone)]
pub struct Deal {
    pub anchors: Vec<Card>,
    pub hands: Vec<Vec<Card>>,
}

/// The 52 canonical cards in deterministic suit-major order.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for value in MIN_VALUE..=MAX_VALUE {
            deck.push(Card { suit, value });
        }
    }
    deck
}

/// Uniform Fisher-Yates shuffle in place.
pub fn shuffle_deck<R: Rng>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Extract the four 7s as board anchors and split the shuffled remainder into
/// `num_players` equal shares of `floor(48 / num_players)` cards.
///
/// Remainder cards from an uneven split are dropped, not dealt. This mirrors
/// the observed behavior of the game rather than a fairness-ideal deal.
pub fn deal_cards<R: Rng>(
    deck: &[Card],
    num_players: usize,
    rng: &mut R,
) -> Result<Deal, GameError> {
    if num_players == 0 || num_players > MAX_SEATS {
        return Err(GameError::internal(format!(
            "cannot deal to {num_players} players"
        )));
    }

    let anchors: Vec<Card> = deck.iter().copied().filter(Card::is_anchor).collect();
    if anchors.len() != 4 {
        return Err(GameError::internal(format!(
            "deck has {} anchor cards, expected 4",
            anchors.len()
        )));
    }

    let mut rest: Vec<Card> = deck.iter().copied().filter(|c| !c.is_anchor()).collect();
    shuffle_deck(&mut rest, rng);

    let per_player = rest.len() / num_players;
    let hands = (0..num_players)
        .map(|i| rest[i * per_player..(i + 1) * per_player].to_vec())
        .collect();

    Ok(Deal { anchors, hands })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn deck_has_52_unique_ids() {
        let deck = create_deck();
        assert_eq!(deck.len(), 52);
        let ids: HashSet<String> = deck.iter().map(Card::id).collect();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let deck = create_deck();
        let mut shuffled = deck.clone();
        let mut rng = StdRng::seed_from_u64(7);
        shuffle_deck(&mut shuffled, &mut rng);

        let before: HashSet<String> = deck.iter().map(Card::id).collect();
        let after: HashSet<String> = shuffled.iter().map(Card::id).collect();
        assert_eq!(before, after);
        assert_eq!(shuffled.len(), 52);
    }

    #[test]
    fn deal_extracts_one_anchor_per_suit() {
        let deck = create_deck();
        let mut rng = StdRng::seed_from_u64(1);
        let deal = deal_cards(&deck, 4, &mut rng).unwrap();

        assert_eq!(deal.anchors.len(), 4);
        let suits: HashSet<Suit> = deal.anchors.iter().map(|c| c.suit).collect();
        assert_eq!(suits.len(), 4);
        assert!(deal.anchors.iter().all(|c| c.value == ANCHOR_VALUE));
    }

    #[test]
    fn deal_conservation_for_each_player_count() {
        let deck = create_deck();
        for num_players in 2..=4usize {
            let mut rng = StdRng::seed_from_u64(99);
            let deal = deal_cards(&deck, num_players, &mut rng).unwrap();

            let per_player = 48 / num_players;
            let dealt: usize = deal.hands.iter().map(Vec::len).sum();
            assert_eq!(deal.hands.len(), num_players);
            assert_eq!(dealt, per_player * num_players);
            assert_eq!(dealt, 48 - 48 % num_players);

            // No card appears twice across hands and anchors.
            let mut seen = HashSet::new();
            for card in deal.anchors.iter().chain(deal.hands.iter().flatten()) {
                assert!(seen.insert(card.id()), "duplicate card {card}");
            }
        }
    }

    #[test]
    fn deal_rejects_bad_player_counts() {
        let deck = create_deck();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(deal_cards(&deck, 0, &mut rng).is_err());
        assert!(deal_cards(&deck, 5, &mut rng).is_err());
    }
}
