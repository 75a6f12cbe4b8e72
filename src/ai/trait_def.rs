//! Bot player trait definition.

use std::fmt;

use crate::domain::{Board, Card};
use crate::error::AppError;

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum BotError {
    /// Bot was asked to choose with no legal moves available
    NoLegalMoves,
    /// Bot encountered an internal error
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::NoLegalMoves => write!(f, "bot has no legal moves"),
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(format!("bot error: {err}"))
    }
}

/// What a bot is allowed to see when choosing a card: its own hand, the
/// public board, and its pass counter. Other hands stay hidden.
pub struct BotView<'a> {
    pub hand: &'a [Card],
    pub board: &'a Board,
    pub pass_count: u8,
    /// Precomputed legal moves for `hand` against `board`, never empty.
    pub legal_moves: &'a [Card],
}

/// Trait for bot players.
///
/// Implementations only decide *which* card to play. The turn coordinator
/// owns the pass/forfeit ladder and only calls in when `legal_moves` is
/// non-empty, so a bot never has to reason about passing.
pub trait BotPlayer: Send + Sync {
    /// Choose one of `view.legal_moves` to play.
    fn choose_card(&self, view: &BotView<'_>) -> Result<Card, BotError>;
}
