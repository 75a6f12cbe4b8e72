//! Shared application state handed to every connection.

use std::sync::Arc;

use crate::ai::{self, BotPlayer, HeuristicBot};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::registry::RoomRegistry;
use crate::ws::hub::WsHub;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub registry: Arc<RoomRegistry>,
    pub hub: Arc<WsHub>,
    /// Strategy shared by every bot seat; implementations are stateless or
    /// internally synchronized.
    pub bot: Arc<dyn BotPlayer>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, AppError> {
        let bot = ai::create_bot(&config.bot_strategy, None).ok_or_else(|| {
            AppError::config(format!("unknown bot strategy: {:?}", config.bot_strategy))
        })?;
        Ok(Self {
            config,
            registry: Arc::new(RoomRegistry::new()),
            hub: Arc::new(WsHub::new()),
            bot,
        })
    }

    /// State for tests: zero timers, deterministic heuristic bot.
    pub fn for_tests() -> Self {
        Self {
            config: ServerConfig::for_tests(),
            registry: Arc::new(RoomRegistry::new()),
            hub: Arc::new(WsHub::new()),
            bot: Arc::new(HeuristicBot::new()),
        }
    }
}
