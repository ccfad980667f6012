//! Tile model and board storage
//!
//! Tiles carry a stable identity so a view layer can animate continuity
//! across moves; the grid is the single authoritative record of positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_TILE_VALUE;

/// Opaque per-tile identity, stable for the tile's whole lifetime
/// (including the surviving side of a merge).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TileId(pub u32);

/// Monotonic id allocator, scoped to one game; ids are never reused even
/// after tiles are removed by merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileIdAlloc {
    next: u32,
}

impl Default for TileIdAlloc {
    fn default() -> Self {
        Self::new()
    }
}

impl TileIdAlloc {
    /// Allocator starting at id 1 (0 reserved so a zeroed id is obviously stale).
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue an id never returned before within this game.
    pub fn next(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// A single numbered game piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Power of two, >= 2
    pub value: u32,
    pub row: u8,
    pub col: u8,
    /// True only for the turn this tile resulted from a merge
    pub just_merged: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u32, row: u8, col: u8) -> Self {
        debug_assert!(value.is_power_of_two() && value >= MIN_TILE_VALUE);
        Self {
            id,
            value,
            row,
            col,
            just_merged: false,
        }
    }
}

/// N x N board of optional tiles, row-major.
///
/// Invariant: a tile's recorded `(row, col)` always equals the cell it is
/// stored in; no two tiles share a cell. Violations are caller bugs and
/// fail fast in debug builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: u8,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Board edge length.
    pub fn size(&self) -> u8 {
        self.size
    }

    fn index(&self, row: u8, col: u8) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row as usize * self.size as usize + col as usize
    }

    /// Tile at `(row, col)`, if any.
    pub fn get(&self, row: u8, col: u8) -> Option<&Tile> {
        self.cells[self.index(row, col)].as_ref()
    }

    /// Place a tile; its recorded position must match the cell.
    pub fn set(&mut self, tile: Tile) {
        debug_assert!(self.get(tile.row, tile.col).is_none(), "cell occupied");
        let idx = self.index(tile.row, tile.col);
        self.cells[idx] = Some(tile);
    }

    /// Remove and return the tile at `(row, col)`.
    pub fn take(&mut self, row: u8, col: u8) -> Option<Tile> {
        let idx = self.index(row, col);
        self.cells[idx].take()
    }

    /// All empty `(row, col)` positions in row-major order (stable for
    /// deterministic spawn selection).
    pub fn empty_cells(&self) -> Vec<(u8, u8)> {
        let mut empties = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.get(row, col).is_none() {
                    empties.push((row, col));
                }
            }
        }
        empties
    }

    /// Iterate occupied tiles in row-major order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Largest tile value on the board (0 when empty).
    pub fn highest_tile(&self) -> u32 {
        self.iter_tiles().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values. Merges conserve this; only spawns raise it.
    pub fn value_sum(&self) -> u64 {
        self.iter_tiles().map(|t| t.value as u64).sum()
    }

    /// Drop stale `just_merged` flags at the start of a turn.
    pub fn clear_merged_flags(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.just_merged = false;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.get(row, col) {
                    Some(tile) => write!(f, "{:>6}", tile.value)?,
                    None => write!(f, "{:>6}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
