//! Wire protocol for the websocket endpoint.
//!
//! Messages are JSON objects discriminated by a `type` field, camelCase on
//! the wire. Client messages carry the room id explicitly so a reconnecting
//! socket can address a room before its identity is re-established.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{BoardCard, Card, Placement, Position};
use crate::state::room::{Player, Room};

/// Commands a client may send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    CreateRoom { username: String },
    #[serde(rename_all = "camelCase")]
    JoinRoom { username: String, room_id: String },
    #[serde(rename_all = "camelCase")]
    ReconnectToRoom { username: String, room_id: String },
    #[serde(rename_all = "camelCase")]
    StartGame { room_id: String },
    #[serde(rename_all = "camelCase")]
    PlayCard {
        room_id: String,
        card: CardRef,
        position: Position,
    },
    #[serde(rename_all = "camelCase")]
    Pass { room_id: String },
    #[serde(rename_all = "camelCase")]
    Forfeit { room_id: String },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String },
}

/// A card as named by a client. Deserializes through the same validation as
/// [`Card`] but kept separate so the handler decides when to trust it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CardRef(pub Card);

/// Public view of a seated player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub username: String,
    pub is_host: bool,
    pub is_bot: bool,
    pub disconnected: bool,
}

impl From<&Player> for PlayerInfo {
    fn from(p: &Player) -> Self {
        PlayerInfo {
            username: p.username.clone(),
            is_host: p.is_host,
            is_bot: p.is_bot,
            disconnected: p.disconnected,
        }
    }
}

/// Events the server pushes to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String, username: String },
    #[serde(rename_all = "camelCase")]
    RoomJoined { room_id: String, username: String },
    #[serde(rename_all = "camelCase")]
    PlayersUpdate { players: Vec<PlayerInfo> },
    /// Private per-player game start: everyone gets the same public fields
    /// but only their own hand.
    #[serde(rename_all = "camelCase")]
    GameStarted {
        current_player: String,
        hand: Vec<Card>,
        cards: Vec<BoardCard>,
        player_positions: HashMap<String, u8>,
        hand_sizes: HashMap<String, usize>,
    },
    #[serde(rename_all = "camelCase")]
    TurnUpdate {
        current_player: String,
        cards: Vec<BoardCard>,
        hand_sizes: HashMap<String, usize>,
    },
    #[serde(rename_all = "camelCase")]
    HandUpdate { hand: Vec<Card> },
    #[serde(rename_all = "camelCase")]
    PassUpdate {
        player: String,
        pass_counts: HashMap<String, u8>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerForfeit {
        player: String,
        cards: Vec<BoardCard>,
        hand_sizes: HashMap<String, usize>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerDisconnected { username: String },
    #[serde(rename_all = "camelCase")]
    PlayerReconnected { username: String },
    #[serde(rename_all = "camelCase")]
    PlayerLeft { username: String },
    /// Full private snapshot sent to a reconnecting player.
    #[serde(rename_all = "camelCase")]
    RoomState {
        room_id: String,
        players: Vec<PlayerInfo>,
        game_started: bool,
        game_over: bool,
        current_player: Option<String>,
        hand: Vec<Card>,
        cards: Vec<BoardCard>,
        player_positions: HashMap<String, u8>,
        hand_sizes: HashMap<String, usize>,
        pass_counts: HashMap<String, u8>,
        winners: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    GameOver {
        winners: Vec<String>,
        results: Vec<Placement>,
    },
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
}

impl ServerMsg {
    pub fn players_update(room: &Room) -> ServerMsg {
        ServerMsg::PlayersUpdate {
            players: room.players.iter().map(PlayerInfo::from).collect(),
        }
    }

    pub fn turn_update(room: &Room) -> ServerMsg {
        ServerMsg::TurnUpdate {
            current_player: room.current_username().unwrap_or_default(),
            cards: room.board.cards().to_vec(),
            hand_sizes: room.hand_sizes(),
        }
    }

    pub fn room_state(room: &Room, username: &str) -> ServerMsg {
        ServerMsg::RoomState {
            room_id: room.id.clone(),
            players: room.players.iter().map(PlayerInfo::from).collect(),
            game_started: room.game_started,
            game_over: room.game_over,
            current_player: room.current_username(),
            hand: room.hand(username).to_vec(),
            cards: room.board.cards().to_vec(),
            player_positions: room.player_positions.clone(),
            hand_sizes: room.hand_sizes(),
            pass_counts: room.pass_counts.clone(),
            winners: room.winners.clone(),
        }
    }
}
