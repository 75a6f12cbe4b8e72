//! Game flow orchestration service.
//!
//! Owns everything that happens between `startGame` and `gameOver`: dealing,
//! turn validation, move application, pass/forfeit bookkeeping, win and
//! game-over detection, and bot turn scheduling. Every method takes a locked
//! `Room`, so callers hold the room mutex across a whole command and every
//! broadcast reflects committed state.

mod bot_coordinator;
mod player_actions;
mod setup;
mod turns;

use crate::errors::domain::GameError;
use crate::state::app_state::AppState;
use crate::state::room::Room;

#[derive(Clone)]
pub struct GameFlowService {
    state: AppState,
}

impl GameFlowService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    /// Validate that a game is running and it is `username`'s turn.
    pub(crate) fn require_turn(&self, room: &Room, username: &str) -> Result<(), GameError> {
        if !room.game_started {
            return Err(GameError::GameNotStarted);
        }
        if room.game_over {
            return Err(GameError::NotYourTurn);
        }
        let current = room
            .current_player()
            .ok_or_else(|| GameError::internal("current player index out of range"))?;
        if current.username != username || current.disconnected {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }
}
