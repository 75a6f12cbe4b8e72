//! Board state and legality: positions, occupancy, isolation, legal moves.
//!
//! Positions are absolute: row is the suit's fixed row, col is the card's own
//! value. This makes a card's position unique regardless of play order, so
//! occupancy checks never race with placement.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{is_adjacent, Card, ANCHOR_VALUE};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// A card placed on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    #[serde(flatten)]
    pub card: Card,
    pub position: Position,
    /// Not connected to the suit's anchor by an unbroken chain; cannot be
    /// extended from.
    pub isolated: bool,
    /// Placed by forced discard rather than a legal play.
    pub forfeited: bool,
}

/// The canonical position of a card: its suit row and its own value as column.
pub fn position_of(card: Card) -> Position {
    Position {
        row: card.suit.row(),
        col: card.value,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<BoardCard>,
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// Board holding the given anchor cards, which are never isolated.
    pub fn with_anchors(anchors: &[Card]) -> Board {
        let cards = anchors
            .iter()
            .map(|&card| BoardCard {
                card,
                position: position_of(card),
                isolated: false,
                forfeited: false,
            })
            .collect();
        Board { cards }
    }

    pub fn cards(&self) -> &[BoardCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.cards.iter().any(|bc| bc.position == position)
    }

    fn has_value(&self, card: Card) -> bool {
        self.cards
            .iter()
            .any(|bc| bc.card.suit == card.suit && bc.card.value == card.value)
    }

    /// Walk from the card's value toward 7 one step at a time within its suit.
    /// The card is isolated iff any intermediate value (exclusive of its own,
    /// inclusive of 7) is missing from the board. Anchors are never isolated.
    pub fn is_isolated(&self, card: Card) -> bool {
        if card.value == ANCHOR_VALUE {
            return false;
        }
        let walk: Box<dyn Iterator<Item = u8>> = if card.value < ANCHOR_VALUE {
            Box::new(card.value + 1..=ANCHOR_VALUE)
        } else {
            Box::new((ANCHOR_VALUE..card.value).rev())
        };
        for value in walk {
            if !self.has_value(Card {
                suit: card.suit,
                value,
            }) {
                return true;
            }
        }
        false
    }

    fn recompute_isolation(&mut self) {
        let snapshot = self.clone();
        for bc in &mut self.cards {
            bc.isolated = snapshot.is_isolated(bc.card);
        }
    }

    /// Place a card at its canonical position and refresh isolation flags.
    /// The caller has already validated legality (or is forfeiting).
    pub fn place(&mut self, card: Card, forfeited: bool) {
        self.cards.push(BoardCard {
            card,
            position: position_of(card),
            isolated: false,
            forfeited,
        });
        self.recompute_isolation();
    }

    /// Place a forfeited card at its own position if that spot is free.
    /// Returns false (card dropped) on collision; collisions are not errors.
    pub fn place_forfeited(&mut self, card: Card) -> bool {
        if self.is_occupied(position_of(card)) {
            return false;
        }
        self.place(card, true);
        true
    }

    /// A hand card is playable iff it is adjacent to some non-isolated board
    /// card of the same suit and its own position is free. Adjacency to an
    /// isolated card does not count.
    pub fn is_playable(&self, card: Card) -> bool {
        if self.is_occupied(position_of(card)) {
            return false;
        }
        self.cards
            .iter()
            .any(|bc| !bc.isolated && is_adjacent(card, bc.card))
    }

    pub fn legal_moves(&self, hand: &[Card]) -> Vec<Card> {
        hand.iter().copied().filter(|&c| self.is_playable(c)).collect()
    }

    /// The card's own computed position, if unoccupied.
    pub fn find_position(&self, card: Card) -> Option<Position> {
        let position = position_of(card);
        (!self.is_occupied(position)).then_some(position)
    }
}
