//! Bot player module - handles automated seat decisions.
//!
//! This module provides:
//! - `BotPlayer` trait for pluggable strategies
//! - `RandomBot`: plays a random legal card (seedable for tests)
//! - `HeuristicBot`: deterministic scoring of legal cards
//! - a name-keyed registry so the strategy is a config value

mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use heuristic::HeuristicBot;
pub use random::RandomBot;
pub use registry::{by_name, create_bot, registered_bots, BotFactory};
pub use trait_def::{BotError, BotPlayer, BotView};
