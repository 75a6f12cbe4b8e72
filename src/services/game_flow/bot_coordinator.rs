use tracing::warn;

use super::GameFlowService;
use crate::ai::BotView;
use crate::domain::position_of;
use crate::services::spawn_timer;
use crate::state::room::{Room, MAX_PASSES};

impl GameFlowService {
    /// If the current player is a bot, schedule its move after the pacing
    /// delay. The epoch captured here must still match when the timer fires;
    /// any turn change in between invalidates the timer.
    pub(crate) fn maybe_schedule_bot(&self, room: &mut Room) {
        if !room.game_started || room.game_over {
            return;
        }
        let bot_turn = room
            .current_player()
            .is_some_and(|p| p.is_bot && room.is_eligible(p));
        if !bot_turn {
            return;
        }

        room.bot_epoch += 1;
        let epoch = room.bot_epoch;
        let room_id = room.id.clone();
        let flow = self.clone();
        let delay = self.state().config.bot_delay;
        spawn_timer(async move {
            tokio::time::sleep(delay).await;
            flow.run_scheduled_bot(&room_id, epoch);
        });
    }

    fn run_scheduled_bot(&self, room_id: &str, epoch: u64) {
        let Some(handle) = self.state().registry.get(room_id) else {
            return;
        };
        let mut room = handle.lock();
        if room.bot_epoch != epoch || !room.game_started || room.game_over {
            return;
        }
        self.execute_bot_turn(&mut room);
    }

    /// Take one bot turn synchronously: play if possible, otherwise pass,
    /// otherwise forfeit. Public so tests can drive bot games without timers.
    pub fn execute_bot_turn(&self, room: &mut Room) {
        if !room.game_started || room.game_over {
            return;
        }
        let Some(current) = room.current_player() else {
            return;
        };
        if !current.is_bot {
            return;
        }
        let username = current.username.clone();

        let hand = room.hand(&username).to_vec();
        let legal = room.board.legal_moves(&hand);
        let outcome = if legal.is_empty() {
            if room.pass_count(&username) < MAX_PASSES {
                self.pass(room, &username)
            } else {
                self.forfeit(room, &username)
            }
        } else {
            let view = BotView {
                hand: &hand,
                board: &room.board,
                pass_count: room.pass_count(&username),
                legal_moves: &legal,
            };
            let card = match self.state().bot.choose_card(&view) {
                Ok(card) if legal.contains(&card) => card,
                Ok(card) => {
                    warn!(bot = %username, card = %card.id(), "bot chose an illegal card");
                    legal[0]
                }
                Err(err) => {
                    warn!(bot = %username, error = %err, "bot failed to choose");
                    legal[0]
                }
            };
            self.play_card(room, &username, card, position_of(card))
        };

        if let Err(err) = outcome {
            warn!(room_id = %room.id, bot = %username, error = %err, "bot action rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    use crate::services::GameFlowService;
    use crate::state::app_state::AppState;
    use crate::state::room::Room;

    #[test]
    fn bot_turn_makes_progress() {
        let flow = GameFlowService::new(AppState::for_tests());
        let mut room = Room::new("777".into(), "host".into(), Uuid::new_v4());
        let mut rng = StdRng::seed_from_u64(20);
        flow.start_game_with_rng(&mut room, "host", &mut rng).unwrap();

        // Skip to a bot's turn if a human starts.
        while room.current_player().is_some_and(|p| !p.is_bot) {
            flow.advance_turn(&mut room);
        }
        let bot = room.current_username().unwrap();
        let hand_before = room.hand(&bot).len();
        let passes_before = room.pass_count(&bot);

        flow.execute_bot_turn(&mut room);

        let played = room.hand(&bot).len() < hand_before;
        let passed = room.pass_count(&bot) > passes_before;
        let gone = room.winners.contains(&bot);
        assert!(played || passed || gone);
    }

    #[test]
    fn human_turn_is_left_alone() {
        let flow = GameFlowService::new(AppState::for_tests());
        let mut room = Room::new("778".into(), "host".into(), Uuid::new_v4());
        let mut rng = StdRng::seed_from_u64(21);
        flow.start_game_with_rng(&mut room, "host", &mut rng).unwrap();

        while room.current_player().is_some_and(|p| p.is_bot) {
            flow.advance_turn(&mut room);
        }
        let board_before = room.board.len();
        flow.execute_bot_turn(&mut room);
        assert_eq!(room.board.len(), board_before);
        assert_eq!(room.current_username().unwrap(), "host");
    }
}
