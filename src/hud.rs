//! HUD model and frame snapshot
//!
//! Both are read-only projections of `GameState`. `Hud` holds what the
//! overlay draws; `FrameSnapshot` is everything a frontend needs for one
//! frame and serializes for the headless driver.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::consts::*;
use crate::sim::state::{Cell, Direction, GameEvent, GamePhase, GameState, Motion};

/// Format seconds as `h:mm:ss`
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    format!("{}:{:02}:{:02}", h, m, s)
}

/// Overlay contents for the current frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Elapsed game time, frozen while a win is being celebrated
    pub clock: String,
    pub status: GamePhase,
    pub lives: u32,
    pub points: u64,
    pub level: u32,
    /// Filled speed pips out of MAX_SPEED
    pub speed_pips: u8,
    pub coin_banner: Option<Vec2>,
    pub life_banner: Option<Vec2>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            clock: format_clock(state.elapsed()),
            status: state.phase(),
            lives: state.lives,
            points: state.points,
            level: state.level,
            speed_pips: state.speed.min(MAX_SPEED),
            coin_banner: state.coin_banner.map(|b| b.offset()),
            life_banner: state.life_banner.map(|b| b.offset()),
        }
    }

    /// Status line text
    pub fn status_text(&self) -> &'static str {
        match self.status {
            GamePhase::Playing => "Playing",
            GamePhase::Won => "You win!",
            GamePhase::Lost => "Game over",
        }
    }
}

/// Everything a renderer reads for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub player_pos: Vec3,
    pub player_cell: Cell,
    pub facing: Direction,
    pub motion: Motion,
    pub tiles_present: Vec<Vec<bool>>,
    pub tiles_moving: Vec<Vec<bool>>,
    pub moving_tile_y: f32,
    pub obstacles: Vec<Cell>,
    pub coins: Vec<Cell>,
    pub elapsed: f64,
    pub won: bool,
    pub lost: bool,
    pub camera: CameraRig,
    pub hud: Hud,
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let rows = |grid: &[[bool; GRID_SIZE as usize]; GRID_SIZE as usize]| -> Vec<Vec<bool>> {
            grid.iter().map(|row| row.to_vec()).collect()
        };
        Self {
            tick: state.time_ticks,
            player_pos: state.player.pos,
            player_cell: state.player.cell,
            facing: state.player.facing,
            motion: state.player.motion,
            tiles_present: rows(state.grid.presence()),
            tiles_moving: rows(state.grid.motion()),
            moving_tile_y: state.moving_tile_y(),
            obstacles: state.obstacles.iter().copied().collect(),
            coins: state.coins.iter().copied().collect(),
            elapsed: state.elapsed(),
            won: state.won_at.is_some(),
            lost: state.lost_at.is_some(),
            camera: state.camera,
            hud: Hud::from_state(state),
            events: state.events.clone(),
        }
    }
}
