//! Random bot - plays a uniformly random legal card.
//!
//! This is the reference implementation of the [`BotPlayer`](super::BotPlayer)
//! trait: thread-safe interior mutability with `Mutex<StdRng>`, optional
//! seeding for deterministic tests, and no panics.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{BotError, BotPlayer, BotView};
use crate::domain::Card;

pub struct RandomBot {
    /// Wrapped in `Mutex` because trait methods take `&self` but the RNG
    /// needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub const NAME: &'static str = "random";

    /// Create a new `RandomBot`. `Some(seed)` gives reproducible behavior
    /// for tests; `None` draws from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            StdRng::seed_from_u64(s)
        } else {
            StdRng::from_entropy()
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl BotPlayer for RandomBot {
    fn choose_card(&self, view: &BotView<'_>) -> Result<Card, BotError> {
        if view.legal_moves.is_empty() {
            return Err(BotError::NoLegalMoves);
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Internal(format!("RNG lock poisoned: {e}")))?;

        view.legal_moves
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| BotError::Internal("failed to choose random card".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Card, Suit};

    fn seven(suit: Suit) -> Card {
        Card::new(suit, 7).unwrap()
    }

    fn board_with_anchors() -> Board {
        Board::with_anchors(&[
            seven(Suit::Clubs),
            seven(Suit::Diamonds),
            seven(Suit::Hearts),
            seven(Suit::Spades),
        ])
    }

    #[test]
    fn chooses_only_legal_cards() {
        let board = board_with_anchors();
        let hand = vec![
            Card::new(Suit::Clubs, 6).unwrap(),
            Card::new(Suit::Hearts, 2).unwrap(),
        ];
        let legal = board.legal_moves(&hand);
        assert_eq!(legal, vec![Card::new(Suit::Clubs, 6).unwrap()]);

        let bot = RandomBot::new(Some(7));
        let view = BotView {
            hand: &hand,
            board: &board,
            pass_count: 0,
            legal_moves: &legal,
        };
        for _ in 0..20 {
            let card = bot.choose_card(&view).unwrap();
            assert!(legal.contains(&card));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let board = board_with_anchors();
        let hand: Vec<Card> = (2..=6)
            .map(|v| Card::new(Suit::Clubs, v).unwrap())
            .chain((8..=12).map(|v| Card::new(Suit::Hearts, v).unwrap()))
            .collect();
        let legal = board.legal_moves(&hand);
        assert!(legal.len() > 1);

        let a = RandomBot::new(Some(99));
        let b = RandomBot::new(Some(99));
        let view = BotView {
            hand: &hand,
            board: &board,
            pass_count: 0,
            legal_moves: &legal,
        };
        for _ in 0..10 {
            assert_eq!(a.choose_card(&view).unwrap(), b.choose_card(&view).unwrap());
        }
    }

    #[test]
    fn empty_legal_moves_is_an_error() {
        let board = board_with_anchors();
        let bot = RandomBot::new(Some(1));
        let view = BotView {
            hand: &[],
            board: &board,
            pass_count: 0,
            legal_moves: &[],
        };
        assert!(matches!(
            bot.choose_card(&view),
            Err(BotError::NoLegalMoves)
        ));
    }
}
