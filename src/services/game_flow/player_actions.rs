use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::{position_of, Card, Position};
use crate::errors::domain::GameError;
use crate::state::room::{Room, MAX_PASSES};
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    /// Play a card from the current player's hand.
    ///
    /// The client names a target position, but the board position of a card
    /// is fully determined by its suit and value; a mismatching claim is
    /// rejected rather than trusted.
    pub fn play_card(
        &self,
        room: &mut Room,
        username: &str,
        card: Card,
        claimed: Position,
    ) -> Result<(), GameError> {
        self.require_turn(room, username)?;

        let hand = room
            .hands
            .get(username)
            .ok_or_else(|| GameError::internal("player has no dealt hand"))?;
        let slot = hand
            .iter()
            .position(|c| *c == card)
            .ok_or(GameError::CardNotInHand)?;

        if !room.board.is_playable(card) {
            return Err(GameError::illegal_move(format!(
                "card {} has no open adjacent position",
                card.id()
            )));
        }
        let expected = position_of(card);
        if claimed != expected {
            return Err(GameError::illegal_move(format!(
                "card {} does not belong at row {} col {}",
                card.id(),
                claimed.row,
                claimed.col
            )));
        }

        if let Some(hand) = room.hands.get_mut(username) {
            hand.remove(slot);
        }
        room.board.place(card, false);
        debug!(room_id = %room.id, player = %username, card = %card.id(), "card played");

        if room.hand(username).is_empty() {
            room.record_result(username, false);
            info!(room_id = %room.id, player = %username, "player finished their hand");
        }

        if self.conclude_move(room) {
            return Ok(());
        }

        let hub = &self.state().hub;
        hub.broadcast_room(room, &ServerMsg::turn_update(room));
        hub.send_to_player(
            room,
            username,
            &ServerMsg::HandUpdate {
                hand: room.hand(username).to_vec(),
            },
        );
        self.maybe_schedule_bot(room);
        Ok(())
    }

    /// Pass the turn. Only allowed when genuinely stuck, and at most three
    /// times per player per game.
    pub fn pass(&self, room: &mut Room, username: &str) -> Result<(), GameError> {
        self.require_turn(room, username)?;

        if room.pass_count(username) >= MAX_PASSES {
            return Err(GameError::PassLimitExceeded);
        }
        if !room.board.legal_moves(room.hand(username)).is_empty() {
            return Err(GameError::HasLegalMove);
        }

        *room.pass_counts.entry(username.to_string()).or_insert(0) += 1;
        debug!(
            room_id = %room.id,
            player = %username,
            passes = room.pass_count(username),
            "player passed"
        );

        let hub = &self.state().hub;
        hub.broadcast_room(
            room,
            &ServerMsg::PassUpdate {
                player: username.to_string(),
                pass_counts: room.pass_counts.clone(),
            },
        );
        self.advance_turn(room);
        hub.broadcast_room(room, &ServerMsg::turn_update(room));
        self.maybe_schedule_bot(room);
        Ok(())
    }

    /// Forfeit the game. Only a last resort: the player must be stuck and
    /// out of passes.
    pub fn forfeit(&self, room: &mut Room, username: &str) -> Result<(), GameError> {
        self.require_turn(room, username)?;

        if !room.board.legal_moves(room.hand(username)).is_empty() {
            return Err(GameError::HasLegalMove);
        }
        if room.pass_count(username) < MAX_PASSES {
            return Err(GameError::PassesRemaining);
        }

        info!(room_id = %room.id, player = %username, "player forfeited");
        self.forfeit_and_continue(room, username);
        Ok(())
    }
}
