//! Best-score record
//!
//! The engine never performs I/O: a storage collaborator loads this at
//! startup, feeds it into the game, and saves it when `observe` reports a
//! change.

use serde::{Deserialize, Serialize};

/// Best results across games, monotone in every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    /// Highest score ever reached
    pub score: u64,
    /// Largest tile ever built
    pub highest_tile: u32,
    /// Completed or abandoned games observed
    pub games_played: u64,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Would this score raise the record?
    pub fn beats(&self, score: u64) -> bool {
        score > self.score
    }

    /// Fold a finished (or in-progress) game's results in. Returns true if
    /// anything changed, so the caller knows to persist.
    pub fn observe(&mut self, score: u64, highest_tile: u32) -> bool {
        let mut changed = false;
        if score > self.score {
            self.score = score;
            changed = true;
        }
        if highest_tile > self.highest_tile {
            self.highest_tile = highest_tile;
            changed = true;
        }
        changed
    }

    /// Count a finished game.
    pub fn record_game(&mut self) {
        self.games_played += 1;
    }
}
