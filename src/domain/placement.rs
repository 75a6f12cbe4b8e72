//! End-of-game placement scoring.

use serde::{Deserialize, Serialize};

/// One entry per player, appended in the order they left the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub username: String,
    pub forfeited: bool,
}

/// A player's final rank; 1 is best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub username: String,
    pub place: u8,
    pub forfeited: bool,
}

/// Rank regular finishers first, in finish order. Forfeiters come after all
/// regular finishers, with the earliest forfeit placed worst.
pub fn compute_final_placements(results: &[GameResult]) -> Vec<Placement> {
    let finishers = results.iter().filter(|r| !r.forfeited);
    let forfeiters = results.iter().filter(|r| r.forfeited).rev();

    finishers
        .chain(forfeiters)
        .enumerate()
        .map(|(i, r)| Placement {
            username: r.username.clone(),
            place: (i + 1) as u8,
            forfeited: r.forfeited,
        })
        .collect()
}
