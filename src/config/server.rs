//! Server configuration loaded from environment variables.
//!
//! Environment variables must be set by the runtime environment; every value
//! has a sensible default so the server boots with no configuration at all.

use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pacing delay before a bot move is applied.
    pub bot_delay: Duration,
    /// Grace period before an abruptly disconnected player is removed.
    pub disconnect_grace: Duration,
    /// Countdown before a room with no connected humans is deleted.
    pub room_close_delay: Duration,
    /// Bot strategy registry name: "heuristic" or "random".
    pub bot_strategy: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            bot_delay: Duration::from_millis(1500),
            disconnect_grace: Duration::from_secs(30),
            room_close_delay: Duration::from_secs(10),
            bot_strategy: "heuristic".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("SEVENS_HOST").unwrap_or(defaults.host),
            port: parse_var("SEVENS_PORT", defaults.port)?,
            bot_delay: Duration::from_millis(parse_var("SEVENS_BOT_DELAY_MS", 1500u64)?),
            disconnect_grace: Duration::from_secs(parse_var(
                "SEVENS_DISCONNECT_GRACE_SECS",
                30u64,
            )?),
            room_close_delay: Duration::from_secs(parse_var("SEVENS_ROOM_CLOSE_SECS", 10u64)?),
            bot_strategy: std::env::var("SEVENS_BOT_STRATEGY").unwrap_or(defaults.bot_strategy),
        })
    }

    /// Config for tests: no bot pacing, no grace periods.
    pub fn for_tests() -> Self {
        Self {
            bot_delay: Duration::ZERO,
            disconnect_grace: Duration::ZERO,
            room_close_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
