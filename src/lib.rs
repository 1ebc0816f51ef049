//! Cube Hopper - A grid-hopping 3D platformer
//!
//! Core modules:
//! - `sim`: Simulation core (grid, player state machine, collisions, lifecycle)
//! - `camera`: View selection and eye/target computation
//! - `hud`: Read-only HUD model for the presentation layer
//! - `settings`: Run configuration

pub mod camera;
pub mod hud;
pub mod settings;
pub mod sim;

pub use camera::{CameraRig, CameraView};
pub use hud::{FrameSnapshot, Hud};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Board is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 10;
    /// Distance between neighbouring cell centres (world units)
    pub const TILE_PITCH: f32 = 2.0;
    /// Half of a cell's extent; containment is strict on both sides
    pub const TILE_HALF: f32 = 1.0;
    /// World X of row 0's centre
    pub const SHIFT_X: f32 = -8.0;
    /// World Z of column 0's centre
    pub const SHIFT_Z: f32 = -10.0;

    /// Player height when standing on a tile
    pub const GROUND_Y: f32 = 4.2;
    /// Ground movement per tick at speed 1
    pub const MOVE_STEP: f32 = 0.1;
    /// Horizontal jump movement per tick
    pub const JUMP_STEP: f32 = 0.05;
    /// Horizontal span of a jump measured from the start cell centre (two cells)
    pub const JUMP_SPAN: f32 = 4.0;
    /// Apex of the jump arc above ground
    pub const JUMP_PEAK: f32 = 2.0;
    /// Vertical drop per tick while falling
    pub const FALL_STEP: f32 = 0.1;
    /// Outward drift per tick after leaving the board
    pub const FALL_OFF_DRIFT: f32 = 0.05;
    /// A falling player is reset once below this height
    pub const FALL_FLOOR: f32 = -10.0;

    /// Speed multiplier bounds
    pub const START_SPEED: u8 = 1;
    pub const MAX_SPEED: u8 = 7;

    /// Moving tiles rest at this height and rise by TILE_RISE_PER_TICK
    pub const TILE_REST_Y: f32 = -1.0;
    pub const TILE_RISE_PER_TICK: f32 = 0.01;
    /// Ticks for a moving tile to go from rest to its top (and back again)
    pub const TILE_HALF_PERIOD: u64 = 300;

    /// Seconds of reset animation before a failure is applied
    pub const RESET_ANIMATION_SECS: f64 = 2.5;
    /// Seconds the win celebration lasts before the next level
    pub const WIN_HOLD_SECS: f64 = 5.0;
    /// Seconds the game-over screen lasts before a fresh game
    pub const LOSE_HOLD_SECS: f64 = 5.0;

    /// Obstacles and coins are regenerated every SPAWN_PERIOD_TICKS
    pub const SPAWN_PERIOD_TICKS: u32 = 200;
    pub const OBSTACLE_ATTEMPTS: u32 = 15;
    pub const COIN_ATTEMPTS: u32 = 20;

    pub const START_LIVES: u32 = 3;
    pub const COIN_POINTS: u64 = 20;
    pub const LEVEL_POINTS: u64 = 100;

    /// One bonus-life roll per interval while on a diagonal cell
    pub const BONUS_LIFE_INTERVAL_SECS: f64 = 1.0;
    /// Bonus life odds: 1 in BONUS_LIFE_ODDS
    pub const BONUS_LIFE_ODDS: u32 = 500;

    /// Presence/motion odds numerator; divided by the level
    pub const TILE_ODDS_BASE: u32 = 40;

    /// HUD banner animation length in ticks
    pub const BANNER_TICKS: u32 = 200;
}

use consts::*;

/// World X of a row's centre
#[inline]
pub fn row_center(row: i32) -> f32 {
    SHIFT_X + TILE_PITCH * row as f32
}

/// World Z of a column's centre
#[inline]
pub fn col_center(col: i32) -> f32 {
    SHIFT_Z + TILE_PITCH * col as f32
}

/// Index of the grid line whose cell strictly contains `coord`
///
/// Returns None on a cell boundary or off the board.
#[inline]
pub fn containing_index(coord: f32, shift: f32) -> Option<i32> {
    let index = ((coord - shift + TILE_HALF) / TILE_PITCH).floor() as i32;
    if !(0..GRID_SIZE).contains(&index) {
        return None;
    }
    let center = shift + TILE_PITCH * index as f32;
    if coord > center - TILE_HALF && coord < center + TILE_HALF {
        Some(index)
    } else {
        None
    }
}
