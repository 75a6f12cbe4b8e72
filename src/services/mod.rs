//! Service layer: room lifecycle and game flow orchestration on top of the
//! domain rules.

pub mod game_flow;
pub mod rooms;

use std::future::Future;

pub use game_flow::GameFlowService;
pub use rooms::RoomService;

/// Spawn a timer future onto the current tokio runtime, if one exists.
///
/// Synchronous unit tests drive turns directly and run without a runtime;
/// skipping the spawn there keeps the services callable from plain `#[test]`
/// functions.
pub(crate) fn spawn_timer<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(fut);
        }
        Err(_) => {
            tracing::debug!("no async runtime; timer not scheduled");
        }
    }
}
