//! Deterministic game engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, injected through explicit arguments
//! - Move resolution is a pure function over an immutable grid snapshot
//! - No rendering, audio or platform dependencies
//!
//! Collaborators read the state and events published after each transition;
//! nothing here suspends mid-transition or holds references past a call.

pub mod grid;
pub mod moves;
pub mod spawn;
pub mod state;

pub use grid::{Grid, Tile, TileId, TileIdAlloc};
pub use moves::{Direction, MergeEvent, MoveOutcome, slide};
pub use spawn::{SpawnPolicy, spawn};
pub use state::{GameState, GameStatus, MoveReport};
