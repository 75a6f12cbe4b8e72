//! Domain layer: pure board and scoring logic with no I/O.

pub mod board;
pub mod cards;
pub mod deck;
pub mod placement;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_board;

// Re-exports for ergonomics
pub use board::{position_of, Board, BoardCard, Position};
pub use cards::{is_adjacent, Card, Suit, ANCHOR_VALUE, MAX_VALUE, MIN_VALUE};
pub use deck::{create_deck, deal_cards, shuffle_deck, Deal};
pub use placement::{compute_final_placements, GameResult, Placement};
