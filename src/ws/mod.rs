pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::{Outbound, WsHub};
pub use protocol::{ClientMsg, PlayerInfo, ServerMsg};
pub use session::WsSession;
