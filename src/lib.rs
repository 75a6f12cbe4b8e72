#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod health;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod ws;

// Re-exports for public API
pub use config::ServerConfig;
pub use error::AppError;
pub use errors::GameError;
pub use services::{GameFlowService, RoomService};
pub use state::app_state::AppState;
