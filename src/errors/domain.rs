//! Domain-level error taxonomy for room and game commands.
//!
//! Every validation failure is recovered locally: it produces an `error`
//! event to the offending connection and never mutates room state. Handlers
//! convert to `crate::error::AppError` via the provided `From` impl.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    RoomNotFound,
    RoomFull,
    /// Internal only; room creation retries with a fresh id.
    RoomIdCollision,
    GameAlreadyStarted,
    GameNotStarted,
    NotHost,
    NotYourTurn,
    CardNotInHand,
    IllegalMove(String),
    PassLimitExceeded,
    /// Cannot pass or forfeit while a legal move exists.
    HasLegalMove,
    /// Cannot forfeit while the pass allowance is not exhausted.
    PassesRemaining,
    UsernameTaken,
    /// Invariant violation; the room is logged and dropped, never the process.
    Internal(String),
}

impl GameError {
    pub fn internal(detail: impl Into<String>) -> Self {
        GameError::Internal(detail.into())
    }

    pub fn illegal_move(detail: impl Into<String>) -> Self {
        GameError::IllegalMove(detail.into())
    }

    /// Stable wire code for the `error` event.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::RoomNotFound => "ROOM_NOT_FOUND",
            GameError::RoomFull => "ROOM_FULL",
            GameError::RoomIdCollision => "ROOM_ID_COLLISION",
            GameError::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            GameError::GameNotStarted => "GAME_NOT_STARTED",
            GameError::NotHost => "NOT_HOST",
            GameError::NotYourTurn => "NOT_YOUR_TURN",
            GameError::CardNotInHand => "CARD_NOT_IN_HAND",
            GameError::IllegalMove(_) => "ILLEGAL_MOVE",
            GameError::PassLimitExceeded => "PASS_LIMIT_EXCEEDED",
            GameError::HasLegalMove => "HAS_LEGAL_MOVE",
            GameError::PassesRemaining => "PASSES_REMAINING",
            GameError::UsernameTaken => "USERNAME_TAKEN",
            GameError::Internal(_) => "INTERNAL",
        }
    }
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::RoomNotFound => write!(f, "room does not exist"),
            GameError::RoomFull => write!(f, "room is full"),
            GameError::RoomIdCollision => write!(f, "room id already in use"),
            GameError::GameAlreadyStarted => write!(f, "game already started"),
            GameError::GameNotStarted => write!(f, "game has not started"),
            GameError::NotHost => write!(f, "only the host can start the game"),
            GameError::NotYourTurn => write!(f, "it is not your turn"),
            GameError::CardNotInHand => write!(f, "you do not have that card"),
            GameError::IllegalMove(d) => write!(f, "that card cannot be played: {d}"),
            GameError::PassLimitExceeded => write!(f, "you have already passed 3 times"),
            GameError::HasLegalMove => write!(f, "you still have a legal move"),
            GameError::PassesRemaining => write!(f, "you still have passes left"),
            GameError::UsernameTaken => write!(f, "that name is already taken"),
            GameError::Internal(d) => write!(f, "internal error: {d}"),
        }
    }
}

impl Error for GameError {}
