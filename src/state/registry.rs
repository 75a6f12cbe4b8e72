//! Live room registry.
//!
//! Rooms live behind `Arc<Mutex<Room>>` handles in a `DashMap`; the map gives
//! lock-free lookup while each room serializes its own commands.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::domain::GameError;
use crate::state::room::Room;
use crate::utils::room_id::generate_room_id;

const CREATE_ATTEMPTS: usize = 50;

#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Mutex<Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with a fresh 3-digit id, retrying on collisions with
    /// live rooms. The id space is 900 wide, so exhaustion means the server
    /// is far past its intended party size.
    pub fn create(
        &self,
        host_username: String,
        conn: Uuid,
    ) -> Result<(String, Arc<Mutex<Room>>), GameError> {
        for _ in 0..CREATE_ATTEMPTS {
            let id = generate_room_id();
            let entry = self.rooms.entry(id.clone());
            if let dashmap::mapref::entry::Entry::Vacant(vacant) = entry {
                let room = Arc::new(Mutex::new(Room::new(
                    id.clone(),
                    host_username.clone(),
                    conn,
                )));
                vacant.insert(room.clone());
                info!(room_id = %id, host = %host_username, "room created");
                return Ok((id, room));
            }
        }
        Err(GameError::RoomIdCollision)
    }

    pub fn get(&self, room_id: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.get(room_id).map(|r| r.value().clone())
    }

    pub fn remove(&self, room_id: &str) -> Option<Arc<Mutex<Room>>> {
        let removed = self.rooms.remove(room_id).map(|(_, room)| room);
        if removed.is_some() {
            info!(room_id = %room_id, "room removed");
        }
        removed
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
