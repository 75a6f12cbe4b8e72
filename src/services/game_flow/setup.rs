use rand::Rng;
use tracing::info;

use super::GameFlowService;
use crate::domain::{create_deck, deal_cards, Board};
use crate::errors::domain::GameError;
use crate::state::room::{Player, Room, MAX_PLAYERS};
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    /// Start (or restart) the game in a room. Only a connected human host may
    /// start. Empty seats are filled with bots up to four players.
    pub fn start_game(&self, room: &mut Room, caller: &str) -> Result<(), GameError> {
        self.start_game_with_rng(room, caller, &mut rand::thread_rng())
    }

    /// Deterministic variant for tests: the RNG drives both the shuffle and
    /// the choice of starting player.
    pub fn start_game_with_rng<R: Rng>(
        &self,
        room: &mut Room,
        caller: &str,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if room.game_started && !room.game_over {
            return Err(GameError::GameAlreadyStarted);
        }
        let host_ok = room
            .player(caller)
            .is_some_and(|p| p.is_host && !p.is_bot && !p.disconnected);
        if !host_ok {
            return Err(GameError::NotHost);
        }

        self.fill_bot_seats(room)?;

        let deck = create_deck();
        let deal = deal_cards(&deck, room.players.len(), rng)?;
        room.board = Board::with_anchors(&deal.anchors);
        room.hands.clear();
        room.pass_counts.clear();
        room.winners.clear();
        room.game_results.clear();
        room.player_positions.clear();
        let seats: Vec<String> = room.players.iter().map(|p| p.username.clone()).collect();
        for (seat, (username, hand)) in seats.into_iter().zip(deal.hands).enumerate() {
            room.hands.insert(username.clone(), hand);
            room.pass_counts.insert(username.clone(), 0);
            room.player_positions.insert(username, seat as u8 + 1);
        }
        room.current_player_index = rng.gen_range(0..room.players.len());
        room.game_started = true;
        room.game_over = false;

        info!(
            room_id = %room.id,
            players = room.players.len(),
            starter = %room.current_username().unwrap_or_default(),
            "game started"
        );

        // Each human gets the same public state but only their own hand.
        let current_player = room.current_username().unwrap_or_default();
        let hand_sizes = room.hand_sizes();
        for player in &room.players {
            if !player.is_reachable() {
                continue;
            }
            let msg = ServerMsg::GameStarted {
                current_player: current_player.clone(),
                hand: room.hand(&player.username).to_vec(),
                cards: room.board.cards().to_vec(),
                player_positions: room.player_positions.clone(),
                hand_sizes: hand_sizes.clone(),
            };
            self.state().hub.send_to_player(room, &player.username, &msg);
        }

        self.maybe_schedule_bot(room);
        Ok(())
    }

    fn fill_bot_seats(&self, room: &mut Room) -> Result<(), GameError> {
        let mut n = 1;
        while room.players.len() < MAX_PLAYERS {
            let name = room.unique_username(&format!("Bot {n}"))?;
            room.players.push(Player::bot(name));
            n += 1;
        }
        Ok(())
    }
}
