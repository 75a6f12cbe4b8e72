//! Per-room mutable state: the aggregate root of a Sevens game.
//!
//! A room is always wrapped in a `parking_lot::Mutex` by the registry; every
//! command for a room runs inside that lock, so turn order, occupancy checks
//! and win detection never observe partial mutations.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::{Board, Card, GameResult};
use crate::errors::domain::GameError;

pub const MAX_PLAYERS: usize = 4;
pub const MAX_PASSES: u8 = 3;

#[derive(Debug, Clone)]
pub struct Player {
    pub username: String,
    /// Connection handle; `None` for bots and disconnected players.
    pub conn: Option<Uuid>,
    pub is_host: bool,
    pub is_bot: bool,
    pub disconnected: bool,
}

impl Player {
    pub fn human(username: String, conn: Uuid, is_host: bool) -> Player {
        Player {
            username,
            conn: Some(conn),
            is_host,
            is_bot: false,
            disconnected: false,
        }
    }

    pub fn bot(username: String) -> Player {
        Player {
            username,
            conn: None,
            is_host: false,
            is_bot: true,
            disconnected: false,
        }
    }

    /// Eligible for broadcasts: a human with a live connection.
    pub fn is_reachable(&self) -> bool {
        !self.is_bot && !self.disconnected && self.conn.is_some()
    }
}

pub struct Room {
    pub id: String,
    /// Seat order; defines turn sequence and host-successor order.
    pub players: Vec<Player>,
    pub board: Board,
    pub hands: HashMap<String, Vec<Card>>,
    pub pass_counts: HashMap<String, u8>,
    pub current_player_index: usize,
    pub game_started: bool,
    pub game_over: bool,
    /// Usernames in the order they left the game (win or forfeit).
    pub winners: Vec<String>,
    pub game_results: Vec<GameResult>,
    /// Display seat numbers assigned at game start, re-sent on reconnect.
    pub player_positions: HashMap<String, u8>,
    /// Bumped whenever the turn changes hands; a scheduled bot move only
    /// applies if the epoch it captured is still current.
    pub bot_epoch: u64,
    /// Pending disconnect-grace timers, keyed by username.
    pub grace_tokens: HashMap<String, CancellationToken>,
    /// Pending empty-room close countdown.
    pub close_token: Option<CancellationToken>,
}

impl Room {
    pub fn new(id: String, host_username: String, conn: Uuid) -> Room {
        Room {
            id,
            players: vec![Player::human(host_username, conn, true)],
            board: Board::new(),
            hands: HashMap::new(),
            pass_counts: HashMap::new(),
            current_player_index: 0,
            game_started: false,
            game_over: false,
            winners: Vec::new(),
            game_results: Vec::new(),
            player_positions: HashMap::new(),
            bot_epoch: 0,
            grace_tokens: HashMap::new(),
            close_token: None,
        }
    }

    pub fn player(&self, username: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.username == username)
    }

    pub fn player_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.username == username)
    }

    pub fn player_index(&self, username: &str) -> Option<usize> {
        self.players.iter().position(|p| p.username == username)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn current_username(&self) -> Option<String> {
        self.current_player().map(|p| p.username.clone())
    }

    /// Still in the running: not finished, not forfeited, not disconnected.
    pub fn is_eligible(&self, player: &Player) -> bool {
        !player.disconnected && !self.winners.iter().any(|w| *w == player.username)
    }

    pub fn eligible_count(&self) -> usize {
        self.players.iter().filter(|p| self.is_eligible(p)).count()
    }

    pub fn connected_humans(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !p.is_bot && !p.disconnected)
            .count()
    }

    pub fn humans(&self) -> usize {
        self.players.iter().filter(|p| !p.is_bot).count()
    }

    pub fn hand(&self, username: &str) -> &[Card] {
        self.hands.get(username).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hand_sizes(&self) -> HashMap<String, usize> {
        self.players
            .iter()
            .map(|p| (p.username.clone(), self.hand(&p.username).len()))
            .collect()
    }

    pub fn pass_count(&self, username: &str) -> u8 {
        self.pass_counts.get(username).copied().unwrap_or(0)
    }

    /// Resolve a display name that does not collide with any seated player,
    /// suffixing a counter when needed ("Ada", "Ada2", "Ada3", ...).
    pub fn unique_username(&self, base: &str) -> Result<String, GameError> {
        if self.player(base).is_none() {
            return Ok(base.to_string());
        }
        for n in 2..100u32 {
            let candidate = format!("{base}{n}");
            if self.player(&candidate).is_none() {
                return Ok(candidate);
            }
        }
        Err(GameError::UsernameTaken)
    }

    /// Record a player leaving the game. A username is recorded at most once.
    pub fn record_result(&mut self, username: &str, forfeited: bool) {
        if self.winners.iter().any(|w| w == username) {
            return;
        }
        self.winners.push(username.to_string());
        self.game_results.push(GameResult {
            username: username.to_string(),
            forfeited,
        });
    }

    /// Re-establish the host invariant: exactly one host among connected
    /// non-bot players whenever any such player exists.
    pub fn ensure_host(&mut self) -> Option<String> {
        if self
            .players
            .iter()
            .any(|p| p.is_host && !p.is_bot && !p.disconnected)
        {
            return None;
        }
        for p in &mut self.players {
            p.is_host = false;
        }
        let successor = self
            .players
            .iter_mut()
            .find(|p| !p.is_bot && !p.disconnected)?;
        successor.is_host = true;
        Some(successor.username.clone())
    }

    /// Cancel and forget any pending grace timer for the player.
    pub fn cancel_grace(&mut self, username: &str) {
        if let Some(token) = self.grace_tokens.remove(username) {
            token.cancel();
        }
    }

    /// Cancel any pending room close countdown.
    pub fn cancel_close(&mut self) {
        if let Some(token) = self.close_token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_with(players: Vec<Player>) -> Room {
        let mut room = Room::new("100".into(), "host".into(), Uuid::new_v4());
        room.players = players;
        room
    }

    #[test]
    fn unique_username_suffixes_collisions() {
        let room = room_with(vec![
            Player::human("Ada".into(), Uuid::new_v4(), true),
            Player::bot("Ada2".into()),
        ]);
        assert_eq!(room.unique_username("Grace").unwrap(), "Grace");
        assert_eq!(room.unique_username("Ada").unwrap(), "Ada3");
    }

    #[test]
    fn record_result_is_idempotent_per_username() {
        let mut room = room_with(vec![Player::bot("b".into())]);
        room.record_result("b", false);
        room.record_result("b", true);
        assert_eq!(room.winners, vec!["b"]);
        assert_eq!(room.game_results.len(), 1);
        assert!(!room.game_results[0].forfeited);
    }

    #[test]
    fn ensure_host_promotes_next_connected_human() {
        let mut room = room_with(vec![
            Player {
                disconnected: true,
                ..Player::human("a".into(), Uuid::new_v4(), true)
            },
            Player::bot("bot".into()),
            Player::human("b".into(), Uuid::new_v4(), false),
        ]);
        assert_eq!(room.ensure_host().as_deref(), Some("b"));
        assert!(!room.players[0].is_host);
        assert!(room.players[2].is_host);
        // Second call is a no-op.
        assert_eq!(room.ensure_host(), None);
    }

    #[test]
    fn eligibility_excludes_winners_and_disconnected() {
        let mut room = room_with(vec![
            Player::human("a".into(), Uuid::new_v4(), true),
            Player {
                disconnected: true,
                ..Player::human("b".into(), Uuid::new_v4(), false)
            },
            Player::bot("c".into()),
        ]);
        room.winners.push("c".into());
        assert_eq!(room.eligible_count(), 1);
    }
}
