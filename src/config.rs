//! Per-game configuration
//!
//! Immutable for the duration of a game; changing any field means starting a
//! fresh game. Persisted by an external settings collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::engine::SpawnPolicy;

/// Rejected configuration, reported before any grid is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported grid size {0} (supported: 4, 5, 6, 8)")]
    UnsupportedGridSize(u8),
    #[error("winning tile {0} must be a power of two >= {MIN_WINNING_TILE}")]
    InvalidWinningTile(u32),
    #[error("four-tile spawn chance {0} must be within 0.0..=1.0")]
    InvalidSpawnChance(f64),
}

/// Per-game parameters: board dimensions, win threshold, spawn odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board is `grid_size` x `grid_size`
    pub grid_size: u8,
    /// First tile at or above this value wins the game
    pub winning_tile: u32,
    /// Spawn value odds
    #[serde(default)]
    pub spawn: SpawnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            winning_tile: DEFAULT_WINNING_TILE,
            spawn: SpawnPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Build a validated config.
    pub fn new(grid_size: u8, winning_tile: u32) -> Result<Self, ConfigError> {
        let config = Self {
            grid_size,
            winning_tile,
            spawn: SpawnPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field against the supported sets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_GRID_SIZES.contains(&self.grid_size) {
            return Err(ConfigError::UnsupportedGridSize(self.grid_size));
        }
        if !self.winning_tile.is_power_of_two() || self.winning_tile < MIN_WINNING_TILE {
            return Err(ConfigError::InvalidWinningTile(self.winning_tile));
        }
        if !(0.0..=1.0).contains(&self.spawn.four_chance) {
            return Err(ConfigError::InvalidSpawnChance(self.spawn.four_chance));
        }
        Ok(())
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}
