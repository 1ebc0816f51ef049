//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; the presentation
//! layer only ever borrows it.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::JumpArc;
use super::grid::Grid;
use crate::camera::CameraRig;
use crate::consts::*;
use crate::{col_center, row_center};

/// Facing / travel direction on the board
///
/// Rows run along world X and columns along world Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// +X (row + 1)
    Up,
    /// -X (row - 1)
    Down,
    /// -Z (col - 1)
    Left,
    /// +Z (col + 1)
    #[default]
    Right,
}

impl Direction {
    /// Priority order used when several keys are held
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// (row, col) step for one cell in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Unit world-space vector on the ground plane
    pub fn world_axis(self) -> Vec3 {
        let (dr, dc) = self.delta();
        Vec3::new(dr as f32, 0.0, dc as f32)
    }

    /// True when travel happens along world X (rows)
    pub fn is_row_axis(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }
}

/// A grid coordinate. Rows/cols of -1 or GRID_SIZE mark a player that has
/// left the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const START: Cell = Cell { row: 0, col: 0 };
    pub const GOAL: Cell = Cell {
        row: GRID_SIZE - 1,
        col: GRID_SIZE - 1,
    };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.row) && (0..GRID_SIZE).contains(&self.col)
    }

    /// Main diagonal or anti-diagonal: the guaranteed path
    pub fn on_diagonal(self) -> bool {
        self.in_bounds() && (self.row == self.col || self.row + self.col == GRID_SIZE - 1)
    }

    /// Cell `steps` cells away in `dir`
    pub fn offset(self, dir: Direction, steps: i32) -> Cell {
        let (dr, dc) = dir.delta();
        Cell::new(self.row + dr * steps, self.col + dc * steps)
    }

    /// World (x, z) of the cell centre
    pub fn center(self) -> (f32, f32) {
        (row_center(self.row), col_center(self.col))
    }

    /// The edge an off-board cell lies beyond
    pub fn edge(self) -> Option<Direction> {
        if self.row < 0 {
            Some(Direction::Down)
        } else if self.row >= GRID_SIZE {
            Some(Direction::Up)
        } else if self.col < 0 {
            Some(Direction::Left)
        } else if self.col >= GRID_SIZE {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Player motion sub-state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Standing on a tile
    Idle,
    /// Sliding along the ground while a direction key is held
    Moving(Direction),
    /// Two-cell hop in progress
    Jumping(JumpArc),
    /// Dropping through a missing tile
    Falling,
    /// Dropping while drifting away from the given board edge
    FallingOff(Direction),
    /// Failure animation; consequences apply once it finishes
    ResetAnimating { since: f64 },
    /// Standing on the goal, waiting for the next level
    Won,
}

impl Motion {
    /// Whether a direction press may start a move or jump
    pub fn accepts_input(&self) -> bool {
        matches!(self, Motion::Idle | Motion::Moving(_))
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self, Motion::Jumping(_))
    }

    pub fn is_falling(&self) -> bool {
        matches!(self, Motion::Falling | Motion::FallingOff(_))
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Motion::ResetAnimating { .. })
    }
}

/// Set of currently held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn release(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Highest-priority held key
    pub fn first(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| self.is_held(*d))
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// The player's cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Continuous world position
    pub pos: Vec3,
    /// Cell currently under the player (may be an off-board sentinel)
    pub cell: Cell,
    pub facing: Direction,
    pub motion: Motion,
    pub held: HeldKeys,
}

impl Default for Player {
    fn default() -> Self {
        let (x, z) = Cell::START.center();
        Self {
            pos: Vec3::new(x, GROUND_Y, z),
            cell: Cell::START,
            facing: Direction::Right,
            motion: Motion::Idle,
            held: HeldKeys::default(),
        }
    }
}

impl Player {
    /// Put the player back on the start cell. Held keys survive so a key
    /// still down after the reset keeps moving the player.
    pub fn respawn(&mut self) {
        let held = self.held;
        *self = Self::default();
        self.held = held;
    }

    /// Stand on the centre of `cell`
    pub fn place_at(&mut self, cell: Cell) {
        let (x, z) = cell.center();
        self.pos = Vec3::new(x, GROUND_Y, z);
        self.cell = cell;
    }

    /// Snap the ground-plane position to the current cell centre
    pub fn snap_to_cell(&mut self) {
        let (x, z) = self.cell.center();
        self.pos.x = x;
        self.pos.z = z;
    }
}

/// A HUD banner flying across the screen (coin pickup, life change)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Banner {
    pub ticks: u32,
}

impl Banner {
    /// Advance one tick; returns false once the animation is over
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        self.ticks < BANNER_TICKS
    }

    /// Screen-space offset: sweeps left to right along a shallow arc
    pub fn offset(&self) -> Vec2 {
        let half = BANNER_TICKS / 2;
        let x = -10.0 + 0.1 * self.ticks as f32;
        let rise = self.ticks.min(half) as f32;
        let fall = self.ticks.saturating_sub(half) as f32;
        Vec2::new(x, 3.0 + 0.015 * (rise - fall))
    }
}

/// Gameplay events emitted during a tick (sound cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected(Cell),
    ObstacleHit(Cell),
    UnsafeTile(Cell),
    FellOff,
    LifeLost { lives: u32 },
    BonusLife { lives: u32 },
    LevelWon { level: u32 },
    GameOver,
    LevelStarted { level: u32 },
}

/// Coarse game phase for HUD text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Won,
    Lost,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated real time in seconds
    pub clock: f64,
    pub grid: Grid,
    pub player: Player,
    pub obstacles: BTreeSet<Cell>,
    pub coins: BTreeSet<Cell>,
    /// Ticks into the current obstacle/coin cycle
    pub spawn_timer: u32,
    pub level: u32,
    pub lives: u32,
    pub points: u64,
    /// Clock value when the current game started
    pub game_start: f64,
    pub won_at: Option<f64>,
    pub lost_at: Option<f64>,
    /// Clock value of the last bonus-life roll
    pub last_bonus_roll: f64,
    /// Ground speed multiplier (0..=MAX_SPEED)
    pub speed: u8,
    pub camera: CameraRig,
    pub coin_banner: Option<Banner>,
    pub life_banner: Option<Banner>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            clock: 0.0,
            grid: Grid::default(),
            player: Player::default(),
            obstacles: BTreeSet::new(),
            coins: BTreeSet::new(),
            spawn_timer: 0,
            level: 1,
            lives: START_LIVES,
            points: 0,
            game_start: 0.0,
            won_at: None,
            lost_at: None,
            last_bonus_roll: 0.0,
            speed: START_SPEED,
            camera: CameraRig::default(),
            coin_banner: None,
            life_banner: None,
            events: Vec::new(),
            quit_requested: false,
        };
        state.grid.regenerate(state.level, &mut state.rng);
        state
    }

    pub fn phase(&self) -> GamePhase {
        if self.lost_at.is_some() {
            GamePhase::Lost
        } else if self.player.motion == Motion::Won {
            GamePhase::Won
        } else {
            GamePhase::Playing
        }
    }

    /// Seconds since the game started, frozen while celebrating a win
    pub fn elapsed(&self) -> f64 {
        let end = self.won_at.unwrap_or(self.clock);
        (end - self.game_start).max(0.0)
    }

    /// Vertical offset of every moving tile this tick
    pub fn moving_tile_y(&self) -> f32 {
        super::grid::moving_tile_offset(self.time_ticks)
    }
}
