//! Tile board: which cells exist and which of them bob up and down

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Cell;
use crate::consts::*;

const N: usize = GRID_SIZE as usize;

/// Presence and motion flags for every cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    present: [[bool; N]; N],
    moving: [[bool; N]; N],
}

impl Default for Grid {
    /// Every tile present, none moving
    fn default() -> Self {
        Self {
            present: [[true; N]; N],
            moving: [[false; N]; N],
        }
    }
}

/// Odds denominator for a level: one draw in `odds` removes a tile
/// (or sets it moving). Floors at 1 so deep levels strip the board to the
/// diagonals instead of dividing by zero.
pub fn tile_odds(level: u32) -> u32 {
    (TILE_ODDS_BASE / level.max(1)).max(1)
}

impl Grid {
    /// Roll a fresh board for `level`
    pub fn regenerate<R: Rng>(&mut self, level: u32, rng: &mut R) {
        let odds = tile_odds(level);

        for row in 0..N {
            for col in 0..N {
                let draw = rng.random_range(0..odds);
                let cell = Cell::new(row as i32, col as i32);
                self.present[row][col] = draw != 0 || cell.on_diagonal();
            }
        }

        for row in 0..N {
            for col in 0..N {
                let draw = rng.random_range(0..odds);
                let cell = Cell::new(row as i32, col as i32);
                self.moving[row][col] =
                    draw == 0 && !cell.on_diagonal() && self.present[row][col];
            }
        }

        log::debug!(
            "Level {} board: {} tiles, {} moving",
            level,
            self.present_count(),
            self.moving_count()
        );
    }

    /// Whether a tile exists under `cell` (false off the board)
    pub fn is_present(&self, cell: Cell) -> bool {
        Self::index(cell).is_some_and(|(r, c)| self.present[r][c])
    }

    /// Whether the tile under `cell` oscillates (false off the board)
    pub fn is_moving(&self, cell: Cell) -> bool {
        Self::index(cell).is_some_and(|(r, c)| self.moving[r][c])
    }

    /// A present tile that holds still
    pub fn is_solid(&self, cell: Cell) -> bool {
        self.is_present(cell) && !self.is_moving(cell)
    }

    pub fn set_present(&mut self, cell: Cell, present: bool) {
        if let Some((r, c)) = Self::index(cell) {
            self.present[r][c] = present;
            if !present {
                self.moving[r][c] = false;
            }
        }
    }

    pub fn set_moving(&mut self, cell: Cell, moving: bool) {
        if let Some((r, c)) = Self::index(cell) {
            self.moving[r][c] = moving && self.present[r][c];
        }
    }

    pub fn present_count(&self) -> usize {
        self.present.iter().flatten().filter(|p| **p).count()
    }

    pub fn moving_count(&self) -> usize {
        self.moving.iter().flatten().filter(|m| **m).count()
    }

    /// Row-major presence flags for renderers
    pub fn presence(&self) -> &[[bool; N]; N] {
        &self.present
    }

    /// Row-major motion flags for renderers
    pub fn motion(&self) -> &[[bool; N]; N] {
        &self.moving
    }

    fn index(cell: Cell) -> Option<(usize, usize)> {
        cell.in_bounds()
            .then_some((cell.row as usize, cell.col as usize))
    }
}

/// Height offset of moving tiles at a given tick
///
/// Triangle wave: rises from TILE_REST_Y for TILE_HALF_PERIOD ticks, then
/// sinks back over the same number of ticks.
pub fn moving_tile_offset(ticks: u64) -> f32 {
    let phase = ticks % (2 * TILE_HALF_PERIOD);
    let climb = if phase < TILE_HALF_PERIOD {
        phase
    } else {
        2 * TILE_HALF_PERIOD - phase
    };
    TILE_REST_Y + TILE_RISE_PER_TICK * climb as f32
}
