//! Room lifecycle service: create, join, reconnect, leave, disconnect.
//!
//! Disconnects are two-phased. An abrupt socket loss marks the player
//! disconnected and starts a grace timer; if the player's turn was stalled
//! the game forces a forfeit immediately. Only when the grace expires (or on
//! an explicit leave) is the seat actually removed. A room with no connected
//! humans left gets a short close countdown before it is deleted.

use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::errors::domain::GameError;
use crate::services::game_flow::GameFlowService;
use crate::services::spawn_timer;
use crate::state::app_state::AppState;
use crate::state::room::{Player, Room, MAX_PLAYERS};
use crate::ws::protocol::ServerMsg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Took a fresh seat; the username may have been suffixed to stay unique.
    Joined { username: String },
    /// Resumed an existing disconnected seat.
    Reconnected { username: String },
}

impl JoinOutcome {
    pub fn username(&self) -> &str {
        match self {
            JoinOutcome::Joined { username } | JoinOutcome::Reconnected { username } => username,
        }
    }
}

#[derive(Clone)]
pub struct RoomService {
    state: AppState,
    flow: GameFlowService,
}

impl RoomService {
    pub fn new(state: AppState) -> Self {
        let flow = GameFlowService::new(state.clone());
        Self { state, flow }
    }

    pub fn flow(&self) -> &GameFlowService {
        &self.flow
    }

    fn normalize(username: &str) -> String {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            "Player".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Create a room with the caller as host. Returns the room id and the
    /// caller's normalized username.
    pub fn create_room(&self, username: &str, conn: Uuid) -> Result<(String, String), GameError> {
        let username = Self::normalize(username);
        let (room_id, handle) = self.state.registry.create(username.clone(), conn)?;
        let room = handle.lock();
        self.state
            .hub
            .broadcast_room(&room, &ServerMsg::players_update(&room));
        Ok((room_id, username))
    }

    /// Join a room, or resume a disconnected seat with a matching username.
    pub fn join_room(
        &self,
        username: &str,
        room_id: &str,
        conn: Uuid,
    ) -> Result<JoinOutcome, GameError> {
        let base = Self::normalize(username);
        let handle = self
            .state
            .registry
            .get(room_id)
            .ok_or(GameError::RoomNotFound)?;
        let mut room = handle.lock();
        room.cancel_close();

        let can_resume = room
            .player(&base)
            .is_some_and(|p| p.disconnected && !p.is_bot);
        if can_resume {
            if let Some(player) = room.player_mut(&base) {
                player.conn = Some(conn);
                player.disconnected = false;
            }
            room.cancel_grace(&base);
            info!(room_id = %room.id, player = %base, "player reconnected");

            let hub = &self.state.hub;
            hub.broadcast_room(
                &room,
                &ServerMsg::PlayerReconnected {
                    username: base.clone(),
                },
            );
            hub.broadcast_room(&room, &ServerMsg::players_update(&room));
            hub.send_to_player(&room, &base, &ServerMsg::room_state(&room, &base));
            return Ok(JoinOutcome::Reconnected { username: base });
        }

        if room.game_started && !room.game_over {
            return Err(GameError::GameAlreadyStarted);
        }
        if room.players.len() >= MAX_PLAYERS {
            return Err(GameError::RoomFull);
        }

        let final_name = room.unique_username(&base)?;
        room.players
            .push(Player::human(final_name.clone(), conn, false));
        info!(room_id = %room.id, player = %final_name, "player joined");
        self.state
            .hub
            .broadcast_room(&room, &ServerMsg::players_update(&room));
        Ok(JoinOutcome::Joined {
            username: final_name,
        })
    }

    /// Deliberate exit: the seat is removed immediately, no grace period.
    pub fn leave_room(&self, room_id: &str, username: &str) -> Result<(), GameError> {
        let handle = self
            .state
            .registry
            .get(room_id)
            .ok_or(GameError::RoomNotFound)?;
        let mut room = handle.lock();
        info!(room_id = %room.id, player = %username, "player left");
        self.hard_remove(&mut room, username);
        Ok(())
    }

    /// Abrupt socket loss. In the lobby (or after a finished game) this is a
    /// plain removal; mid-game the seat is kept for the grace period.
    pub fn handle_disconnect(&self, room_id: &str, username: &str) {
        let Some(handle) = self.state.registry.get(room_id) else {
            return;
        };
        let mut room = handle.lock();
        if room.player(username).is_none() {
            return;
        }

        if !room.game_started || room.game_over {
            info!(room_id = %room.id, player = %username, "player disconnected in lobby");
            self.hard_remove(&mut room, username);
            return;
        }

        if let Some(player) = room.player_mut(username) {
            player.conn = None;
            player.disconnected = true;
        }
        room.ensure_host();
        info!(room_id = %room.id, player = %username, "player disconnected mid-game");

        let hub = &self.state.hub;
        hub.broadcast_room(
            &room,
            &ServerMsg::PlayerDisconnected {
                username: username.to_string(),
            },
        );
        hub.broadcast_room(&room, &ServerMsg::players_update(&room));

        let in_play = !room.winners.iter().any(|w| w == username);
        if in_play && room.current_username().as_deref() == Some(username) {
            // Do not stall the table waiting on a dead socket.
            self.flow.forfeit_and_continue(&mut room, username);
        } else if in_play && room.eligible_count() <= 1 {
            self.flow.finish_game(&mut room);
        }

        self.schedule_grace(&mut room, username);
        self.maybe_schedule_close(&mut room);
    }

    /// Remove a seat outright and keep the room consistent around the hole.
    fn hard_remove(&self, room: &mut Room, username: &str) {
        let Some(idx) = room.player_index(username) else {
            return;
        };
        room.cancel_grace(username);

        if room.game_started && !room.game_over && !room.winners.iter().any(|w| w == username) {
            let was_current = room.current_username().as_deref() == Some(username);
            self.flow.eliminate(room, username);
            if room.eligible_count() <= 1 {
                self.flow.finish_game(room);
            } else if was_current {
                self.flow.advance_turn(room);
            }
        }

        room.players.remove(idx);
        room.hands.remove(username);
        room.pass_counts.remove(username);
        room.player_positions.remove(username);
        if idx < room.current_player_index {
            room.current_player_index -= 1;
        }
        if room.current_player_index >= room.players.len() {
            room.current_player_index = 0;
        }

        if room.players.is_empty() || room.humans() == 0 {
            room.cancel_close();
            self.state.registry.remove(&room.id);
            return;
        }
        room.ensure_host();

        let hub = &self.state.hub;
        hub.broadcast_room(
            room,
            &ServerMsg::PlayerLeft {
                username: username.to_string(),
            },
        );
        hub.broadcast_room(room, &ServerMsg::players_update(room));

        if room.game_started && !room.game_over {
            let current_ok = room
                .current_player()
                .is_some_and(|p| room.is_eligible(p));
            if !current_ok {
                self.flow.advance_turn(room);
            }
            hub.broadcast_room(room, &ServerMsg::turn_update(room));
            self.flow.maybe_schedule_bot(room);
        }
        self.maybe_schedule_close(room);
    }

    fn schedule_grace(&self, room: &mut Room, username: &str) {
        room.cancel_grace(username);
        let token = CancellationToken::new();
        room.grace_tokens
            .insert(username.to_string(), token.clone());

        let service = self.clone();
        let room_id = room.id.clone();
        let username = username.to_string();
        let grace = self.state.config.disconnect_grace;
        spawn_timer(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(grace) => {
                    service.expire_grace(&room_id, &username);
                }
            }
        });
    }

    fn expire_grace(&self, room_id: &str, username: &str) {
        let Some(handle) = self.state.registry.get(room_id) else {
            return;
        };
        let mut room = handle.lock();
        let still_gone = room.player(username).is_some_and(|p| p.disconnected);
        if still_gone {
            info!(room_id = %room.id, player = %username, "grace period expired");
            self.hard_remove(&mut room, username);
        }
    }

    fn maybe_schedule_close(&self, room: &mut Room) {
        if room.connected_humans() > 0 || room.close_token.is_some() {
            return;
        }
        let token = CancellationToken::new();
        room.close_token = Some(token.clone());

        let service = self.clone();
        let room_id = room.id.clone();
        let delay = self.state.config.room_close_delay;
        spawn_timer(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    service.close_room(&room_id);
                }
            }
        });
    }

    fn close_room(&self, room_id: &str) {
        let Some(handle) = self.state.registry.get(room_id) else {
            return;
        };
        {
            let room = handle.lock();
            if room.connected_humans() > 0 {
                return;
            }
        }
        info!(room_id = %room_id, "closing abandoned room");
        self.state.registry.remove(room_id);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    use super::*;
    use crate::state::app_state::AppState;

    fn service() -> RoomService {
        RoomService::new(AppState::for_tests())
    }

    #[test]
    fn join_after_create_seats_both_players() {
        let svc = service();
        let (room_id, host) = svc.create_room("host", Uuid::new_v4()).unwrap();
        assert_eq!(host, "host");

        let outcome = svc.join_room("guest", &room_id, Uuid::new_v4()).unwrap();
        assert_eq!(
            outcome,
            JoinOutcome::Joined {
                username: "guest".into()
            }
        );

        let handle = svc.state.registry.get(&room_id).unwrap();
        assert_eq!(handle.lock().players.len(), 2);
    }

    #[test]
    fn join_unknown_room_fails() {
        let svc = service();
        assert!(matches!(
            svc.join_room("x", "000", Uuid::new_v4()),
            Err(GameError::RoomNotFound)
        ));
    }

    #[test]
    fn duplicate_usernames_are_suffixed() {
        let svc = service();
        let (room_id, _) = svc.create_room("ada", Uuid::new_v4()).unwrap();
        let outcome = svc.join_room("ada", &room_id, Uuid::new_v4()).unwrap();
        assert_eq!(outcome.username(), "ada2");
    }

    #[test]
    fn full_room_rejects_a_fifth_player() {
        let svc = service();
        let (room_id, _) = svc.create_room("a", Uuid::new_v4()).unwrap();
        for name in ["b", "c", "d"] {
            svc.join_room(name, &room_id, Uuid::new_v4()).unwrap();
        }
        assert!(matches!(
            svc.join_room("e", &room_id, Uuid::new_v4()),
            Err(GameError::RoomFull)
        ));
    }

    #[test]
    fn joining_a_running_game_is_rejected() {
        let svc = service();
        let (room_id, _) = svc.create_room("host", Uuid::new_v4()).unwrap();
        let handle = svc.state.registry.get(&room_id).unwrap();
        let mut rng = StdRng::seed_from_u64(30);
        svc.flow()
            .start_game_with_rng(&mut handle.lock(), "host", &mut rng)
            .unwrap();

        assert!(matches!(
            svc.join_room("late", &room_id, Uuid::new_v4()),
            Err(GameError::GameAlreadyStarted)
        ));
    }

    #[test]
    fn disconnect_in_lobby_removes_seat_and_empty_room() {
        let svc = service();
        let (room_id, _) = svc.create_room("host", Uuid::new_v4()).unwrap();
        svc.handle_disconnect(&room_id, "host");
        assert!(svc.state.registry.get(&room_id).is_none());
    }

    #[test]
    fn mid_game_disconnect_keeps_seat_and_forces_forfeit_on_turn() {
        let svc = service();
        let (room_id, _) = svc.create_room("host", Uuid::new_v4()).unwrap();
        svc.join_room("guest", &room_id, Uuid::new_v4()).unwrap();
        let handle = svc.state.registry.get(&room_id).unwrap();
        let mut rng = StdRng::seed_from_u64(31);
        svc.flow()
            .start_game_with_rng(&mut handle.lock(), "host", &mut rng)
            .unwrap();

        // Make it host's turn, then drop them.
        {
            let mut room = handle.lock();
            while room.current_username().as_deref() != Some("host") {
                svc.flow().advance_turn(&mut room);
            }
        }
        svc.handle_disconnect(&room_id, "host");

        let room = handle.lock();
        let host = room.player("host").unwrap();
        assert!(host.disconnected);
        assert!(room.winners.contains(&"host".to_string()));
        assert_ne!(room.current_username().as_deref(), Some("host"));
        // Host role moved to the remaining human.
        assert!(room.player("guest").unwrap().is_host);
    }

    #[test]
    fn reconnect_resumes_the_seat() {
        let svc = service();
        let (room_id, _) = svc.create_room("host", Uuid::new_v4()).unwrap();
        svc.join_room("guest", &room_id, Uuid::new_v4()).unwrap();
        let handle = svc.state.registry.get(&room_id).unwrap();
        let mut rng = StdRng::seed_from_u64(32);
        svc.flow()
            .start_game_with_rng(&mut handle.lock(), "host", &mut rng)
            .unwrap();

        // Drop guest while it is not their turn, so the seat just idles.
        {
            let mut room = handle.lock();
            while room.current_username().as_deref() != Some("host") {
                svc.flow().advance_turn(&mut room);
            }
        }
        svc.handle_disconnect(&room_id, "guest");
        assert!(handle.lock().player("guest").unwrap().disconnected);

        let outcome = svc.join_room("guest", &room_id, Uuid::new_v4()).unwrap();
        assert_eq!(
            outcome,
            JoinOutcome::Reconnected {
                username: "guest".into()
            }
        );
        let room = handle.lock();
        let guest = room.player("guest").unwrap();
        assert!(!guest.disconnected);
        assert!(guest.conn.is_some());
        // Not forfeited: it was never their turn while gone.
        assert!(!room.winners.contains(&"guest".to_string()));
    }

    #[test]
    fn explicit_leave_mid_game_releases_cards() {
        let svc = service();
        let (room_id, _) = svc.create_room("host", Uuid::new_v4()).unwrap();
        svc.join_room("guest", &room_id, Uuid::new_v4()).unwrap();
        let handle = svc.state.registry.get(&room_id).unwrap();
        let mut rng = StdRng::seed_from_u64(33);
        svc.flow()
            .start_game_with_rng(&mut handle.lock(), "host", &mut rng)
            .unwrap();

        svc.leave_room(&room_id, "guest").unwrap();
        let room = handle.lock();
        assert!(room.player("guest").is_none());
        assert!(room.winners.contains(&"guest".to_string()));
        assert!(room.hands.get("guest").is_none());
    }
}
