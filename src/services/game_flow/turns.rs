use tracing::info;

use super::GameFlowService;
use crate::domain::compute_final_placements;
use crate::state::room::Room;
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    /// Move the turn to the next eligible player in seat order. Also bumps
    /// the bot epoch so any timer scheduled for the previous turn is stale.
    pub fn advance_turn(&self, room: &mut Room) {
        let n = room.players.len();
        if n == 0 {
            return;
        }
        room.bot_epoch += 1;
        for _ in 0..n {
            room.current_player_index = (room.current_player_index + 1) % n;
            let candidate = &room.players[room.current_player_index];
            if room.is_eligible(candidate) {
                return;
            }
        }
    }

    /// After an elimination: either the game is over or the turn moves on.
    /// Returns true when the game ended.
    pub(crate) fn conclude_move(&self, room: &mut Room) -> bool {
        if room.eligible_count() <= 1 {
            self.finish_game(room);
            return true;
        }
        self.advance_turn(room);
        false
    }

    /// End the game: the last player standing finishes without forfeiting,
    /// placements are computed from elimination order, and everyone is told.
    pub(crate) fn finish_game(&self, room: &mut Room) {
        let last_standing = room
            .players
            .iter()
            .find(|p| room.is_eligible(p))
            .map(|p| p.username.clone());
        if let Some(username) = last_standing {
            room.record_result(&username, false);
        }
        room.game_over = true;
        room.bot_epoch += 1;

        let results = compute_final_placements(&room.game_results);
        info!(room_id = %room.id, winners = ?room.winners, "game over");
        self.state().hub.broadcast_room(
            room,
            &ServerMsg::GameOver {
                winners: room.winners.clone(),
                results,
            },
        );
    }

    /// Scatter a player's hand onto the board and record their forfeit.
    /// Cards whose absolute position is already taken are dropped.
    pub(crate) fn eliminate(&self, room: &mut Room, username: &str) {
        if let Some(hand) = room.hands.remove(username) {
            for card in hand {
                room.board.place_forfeited(card);
            }
        }
        room.record_result(username, true);
    }

    /// Forfeit a player and keep the game moving. Shared by the explicit
    /// forfeit command and forced forfeits on disconnect.
    pub(crate) fn forfeit_and_continue(&self, room: &mut Room, username: &str) {
        let was_current = room.current_username().as_deref() == Some(username);
        self.eliminate(room, username);

        if room.eligible_count() <= 1 {
            self.finish_game(room);
            return;
        }
        if was_current {
            self.advance_turn(room);
        }

        let hub = &self.state().hub;
        hub.broadcast_room(
            room,
            &ServerMsg::PlayerForfeit {
                player: username.to_string(),
                cards: room.board.cards().to_vec(),
                hand_sizes: room.hand_sizes(),
            },
        );
        hub.broadcast_room(room, &ServerMsg::turn_update(room));
        self.maybe_schedule_bot(room);
    }
}
