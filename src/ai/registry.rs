//! How to register a bot strategy
//!
//! 1) Implement `BotPlayer` for your type in its module.
//! 2) Add a `BotFactory` entry to the static list with a stable `name`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed, same behavior (where applicable).

use std::sync::Arc;

use crate::ai::{BotPlayer, HeuristicBot, RandomBot};

/// Factory definition for constructing bot strategies.
pub struct BotFactory {
    pub name: &'static str,
    pub make: fn(seed: Option<u64>) -> Arc<dyn BotPlayer>,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        name: HeuristicBot::NAME,
        make: make_heuristic,
    },
    BotFactory {
        name: RandomBot::NAME,
        make: make_random,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered bot factory by its strategy name.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots().iter().find(|factory| factory.name == name)
}

/// Construct a bot by strategy name, or `None` if the name is unknown.
pub fn create_bot(name: &str, seed: Option<u64>) -> Option<Arc<dyn BotPlayer>> {
    by_name(name).map(|factory| (factory.make)(seed))
}

fn make_heuristic(_seed: Option<u64>) -> Arc<dyn BotPlayer> {
    Arc::new(HeuristicBot::new())
}

fn make_random(seed: Option<u64>) -> Arc<dyn BotPlayer> {
    Arc::new(RandomBot::new(seed))
}
