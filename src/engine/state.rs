//! Authoritative game state and the per-move transition
//!
//! The state machine owns the grid, the scores and the seeded RNG; the pure
//! move engine and the spawn generator only ever see snapshots. One player
//! input runs one atomic transition: clear flags, slide, commit, spawn,
//! then the terminal checks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile, TileIdAlloc};
use super::moves::{Direction, MergeEvent, slide};
use super::spawn::spawn;
use crate::config::{ConfigError, GameConfig};
use crate::consts::INITIAL_SPAWNS;

/// Where the game stands. `Won` and `GameOver` are terminal: further move
/// requests are defined no-ops until a new game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    GameOver,
}

/// What one `apply_move` call did, for collaborators that animate or play
/// sounds. A rejected or no-op move reports `moved == false` and nothing
/// else.
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub moved: bool,
    pub score_delta: u64,
    pub merges: Vec<MergeEvent>,
    /// The tile inserted after a successful move
    pub spawned: Option<Tile>,
    pub status: GameStatus,
}

impl MoveReport {
    fn noop(status: GameStatus) -> Self {
        Self {
            moved: false,
            score_delta: 0,
            merges: Vec::new(),
            spawned: None,
            status,
        }
    }
}

/// Complete game state (deterministic, serializable).
///
/// The `Pcg32` is serialized directly so a restored game continues the
/// exact random stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    pub score: u64,
    /// Highest score ever reached; monotone, survives new games
    pub best_score: u64,
    pub status: GameStatus,
    /// Seed this game started from, for replay
    pub seed: u64,
    pub moves_played: u64,
    ids: TileIdAlloc,
    rng: Pcg32,
}

impl GameState {
    /// Start a new game: validated config, empty grid, two spawned tiles.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(config, seed, 0))
    }

    fn fresh(config: GameConfig, seed: u64, best_score: u64) -> Self {
        let mut state = Self {
            config,
            grid: Grid::new(config.grid_size),
            score: 0,
            best_score,
            status: GameStatus::Playing,
            seed,
            moves_played: 0,
            ids: TileIdAlloc::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        for _ in 0..INITIAL_SPAWNS {
            if let Some(tile) = spawn(&state.grid, config.spawn, &mut state.ids, &mut state.rng) {
                state.grid.set(tile);
            }
        }
        log::info!(
            "new game: {size}x{size}, first to {target}, seed {seed}",
            size = config.grid_size,
            target = config.winning_tile,
        );
        state
    }

    /// Reset to a fresh game with the same config. Best score survives.
    pub fn new_game(&mut self, seed: u64) {
        *self = Self::fresh(self.config, seed, self.best_score);
    }

    /// Start over with a different config. Never resizes an in-progress
    /// grid; the old game is discarded wholesale. Best score survives.
    pub fn reconfigure(&mut self, config: GameConfig, seed: u64) -> Result<(), ConfigError> {
        config.validate()?;
        *self = Self::fresh(config, seed, self.best_score);
        Ok(())
    }

    /// True while any slide would change the board.
    pub fn has_legal_move(&self) -> bool {
        Direction::ALL.iter().any(|&dir| slide(&self.grid, dir).moved)
    }

    /// Run one full turn: slide, commit, spawn, terminal checks.
    ///
    /// Returns `moved == false` (state untouched apart from cleared merge
    /// flags) when the status is terminal or no tile could move that way.
    pub fn apply_move(&mut self, dir: Direction) -> MoveReport {
        if self.status != GameStatus::Playing {
            return MoveReport::noop(self.status);
        }

        self.grid.clear_merged_flags();
        let outcome = slide(&self.grid, dir);
        if !outcome.moved {
            // A full dead board is detected here even though nothing moved,
            // so the status can never disagree with what the player can do.
            self.refresh_terminal_status();
            return MoveReport::noop(self.status);
        }

        self.grid = outcome.grid;
        self.score += outcome.score_delta;
        self.best_score = self.best_score.max(self.score);
        self.moves_played += 1;

        // A successful move always leaves a slot: a merge freed a cell, or a
        // displacement implies one was already empty.
        let spawned = spawn(&self.grid, self.config.spawn, &mut self.ids, &mut self.rng);
        debug_assert!(spawned.is_some());
        if let Some(tile) = spawned {
            self.grid.set(tile);
        }

        self.refresh_terminal_status();

        MoveReport {
            moved: true,
            score_delta: outcome.score_delta,
            merges: outcome.merges,
            spawned,
            status: self.status,
        }
    }

    /// Win takes precedence over game over: a full dead board holding the
    /// winning tile reports `Won`.
    fn refresh_terminal_status(&mut self) {
        if self.grid.highest_tile() >= self.config.winning_tile {
            self.status = GameStatus::Won;
            log::info!("game won at {} points after {} moves", self.score, self.moves_played);
        } else if self.grid.is_full() && !self.has_legal_move() {
            self.status = GameStatus::GameOver;
            log::info!("game over at {} points after {} moves", self.score, self.moves_played);
        }
    }
}
