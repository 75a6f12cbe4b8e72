//! Connection hub: routes server events to live websocket sessions.
//!
//! Sessions register their actix recipient under a connection id when the
//! socket opens and unregister on close. Services look up recipients by the
//! connection ids stored on room players, so a message to a bot or to a
//! disconnected player is simply dropped.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::state::room::Room;
use crate::ws::protocol::ServerMsg;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct WsHub {
    connections: DashMap<Uuid, Recipient<Outbound>>,
}

impl WsHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Outbound>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Deliver to one connection; silently a no-op if the socket is gone.
    pub fn send_to_conn(&self, conn_id: Uuid, msg: &ServerMsg) {
        if let Some(recipient) = self.connections.get(&conn_id) {
            recipient.value().do_send(Outbound(msg.clone()));
        }
    }

    /// Deliver privately to one seated player, if they are reachable.
    pub fn send_to_player(&self, room: &Room, username: &str, msg: &ServerMsg) {
        if let Some(player) = room.player(username) {
            if player.is_reachable() {
                if let Some(conn_id) = player.conn {
                    self.send_to_conn(conn_id, msg);
                }
            }
        }
    }

    /// Deliver to every reachable player in the room.
    pub fn broadcast_room(&self, room: &Room, msg: &ServerMsg) {
        for player in &room.players {
            if player.is_reachable() {
                if let Some(conn_id) = player.conn {
                    self.send_to_conn(conn_id, msg);
                }
            }
        }
    }
}
