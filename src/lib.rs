//! Neon 2048 - core engine for a themed sliding-tile merge puzzle
//!
//! Core modules:
//! - `engine`: Deterministic grid engine (move/merge, spawning, game state)
//! - `config`: Per-game parameters (grid size, winning tile, spawn policy)
//! - `scores`: Best-score record handed to a persistence collaborator
//!
//! Rendering, animation, input translation, audio and storage are external
//! collaborators: they consume the engine's outputs (new grid, merge events,
//! score delta, terminal flags) and never feed decisions back in.

pub mod config;
pub mod engine;
pub mod scores;

pub use config::{ConfigError, GameConfig};
pub use engine::{
    Direction, GameState, GameStatus, Grid, MergeEvent, MoveOutcome, MoveReport, SpawnPolicy,
    Tile, TileId, slide, spawn,
};
pub use scores::BestScore;

/// Game rule constants
pub mod consts {
    /// Grid sizes the engine supports
    pub const SUPPORTED_GRID_SIZES: [u8; 4] = [4, 5, 6, 8];

    /// Default grid size (classic 4x4)
    pub const DEFAULT_GRID_SIZE: u8 = 4;

    /// Default winning tile
    pub const DEFAULT_WINNING_TILE: u32 = 2048;

    /// Smallest winning tile a config may ask for
    pub const MIN_WINNING_TILE: u32 = 8;

    /// Smallest tile value that can exist on the board
    pub const MIN_TILE_VALUE: u32 = 2;

    /// Default probability that a spawned tile is a 4 (rest are 2s)
    pub const DEFAULT_FOUR_CHANCE: f64 = 0.1;

    /// Tiles placed on the board when a game starts
    pub const INITIAL_SPAWNS: usize = 2;
}
