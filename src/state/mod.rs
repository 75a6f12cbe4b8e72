pub mod app_state;
pub mod registry;
pub mod room;

pub use app_state::AppState;
pub use registry::RoomRegistry;
pub use room::{Player, Room, MAX_PASSES, MAX_PLAYERS};
