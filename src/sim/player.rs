//! Player state machine: input handling and per-tick motion
//!
//! Transitions:
//! - `Idle`/`Moving` + press      -> `Moving(dir)` or `Jumping` (jump modifier held)
//! - `Moving` + release           -> next held key or `Idle`
//! - `Moving`/`Jumping` off board -> `FallingOff(edge)`
//! - `Moving` onto a hole         -> `Falling`
//! - `Falling*` below the floor   -> reset
//! - reaching the goal cell       -> `Won`
//!
//! Presses during any other state only mark the key as held, so the move
//! starts once the blocking state clears.

use super::arc::JumpArc;
use super::collision;
use super::lifecycle::{declare_win, reset_player};
use super::state::{Cell, Direction, GameEvent, GameState, Motion, Player};
use crate::consts::*;
use crate::{col_center, containing_index, row_center};

/// Handle a direction key going down
pub fn press(state: &mut GameState, dir: Direction, jump_held: bool) {
    if state.lost_at.is_some() {
        return;
    }
    let player = &mut state.player;

    if !player.motion.accepts_input() {
        player.held.press(dir);
        return;
    }

    player.facing = dir;
    if jump_held {
        let jump = JumpArc::new(dir, player.cell, player.pos);
        log::debug!("Jump {:?} from ({}, {})", dir, player.cell.row, player.cell.col);
        player.motion = Motion::Jumping(jump);
    } else {
        player.held.press(dir);
        player.motion = Motion::Moving(dir);
    }
}

/// Handle a direction key going up
pub fn release(state: &mut GameState, dir: Direction) {
    let player = &mut state.player;
    player.held.release(dir);

    if player.motion == Motion::Moving(dir) {
        player.motion = match player.held.first() {
            Some(next) => {
                player.facing = next;
                Motion::Moving(next)
            }
            None => Motion::Idle,
        };
    }
}

/// Update `player.cell` from the continuous position
///
/// Inside the board the cell whose square strictly contains the position
/// wins; on a boundary the previous cell is kept. Past the board edges the
/// row/col becomes an off-board sentinel.
pub fn locate(player: &mut Player) {
    let (x, z) = (player.pos.x, player.pos.z);
    if let (Some(row), Some(col)) = (containing_index(x, SHIFT_X), containing_index(z, SHIFT_Z)) {
        player.cell = Cell::new(row, col);
        return;
    }

    let far_x = row_center(GRID_SIZE - 1) + 2.0 * TILE_HALF;
    let far_z = col_center(GRID_SIZE - 1) + 2.0 * TILE_HALF;
    if x < SHIFT_X - TILE_HALF {
        player.cell.row = -1;
    } else if x >= far_x {
        player.cell.row = GRID_SIZE;
    } else if z < SHIFT_Z - TILE_HALF {
        player.cell.col = -1;
    } else if z >= far_z {
        player.cell.col = GRID_SIZE;
    }
}

/// Advance the player by one tick
pub fn advance(state: &mut GameState, now: f64) {
    match state.player.motion {
        Motion::Idle => match state.player.held.first() {
            Some(dir) => {
                state.player.facing = dir;
                state.player.motion = Motion::Moving(dir);
                step_ground(state, now, dir);
            }
            None => settle(state, now),
        },
        Motion::Moving(dir) => step_ground(state, now, dir),
        Motion::Jumping(jump) => step_jump(state, now, jump),
        Motion::Falling => step_fall(state, now, None),
        Motion::FallingOff(edge) => step_fall(state, now, Some(edge)),
        Motion::ResetAnimating { .. } | Motion::Won => {}
    }
}

/// Standing still: the tile under the player can still change
fn settle(state: &mut GameState, now: f64) {
    locate(&mut state.player);
    if state.player.cell == Cell::GOAL {
        declare_win(state, now);
        return;
    }
    collision::resolve(state, now);
}

fn step_ground(state: &mut GameState, now: f64, dir: Direction) {
    let step = MOVE_STEP * state.speed as f32;
    state.player.pos += dir.world_axis() * step;
    locate(&mut state.player);

    let cell = state.player.cell;
    if cell == Cell::GOAL {
        declare_win(state, now);
        return;
    }
    if let Some(edge) = cell.edge() {
        log::info!("Walked off the {:?} edge", edge);
        state.player.motion = Motion::FallingOff(edge);
        state.events.push(GameEvent::FellOff);
        return;
    }
    if !state.grid.is_present(cell) {
        state.player.snap_to_cell();
        state.player.motion = Motion::Falling;
        state.events.push(GameEvent::FellOff);
        return;
    }
    collision::resolve(state, now);
}

fn step_jump(state: &mut GameState, now: f64, mut jump: JumpArc) {
    jump.advance();
    jump.apply(&mut state.player.pos);
    locate(&mut state.player);

    if state.player.cell == Cell::GOAL {
        state.player.snap_to_cell();
        state.player.pos.y = GROUND_Y;
        declare_win(state, now);
        return;
    }

    if !jump.is_complete() {
        state.player.motion = Motion::Jumping(jump);
    } else {
        state.player.pos.y = GROUND_Y;
        if let Some(edge) = state.player.cell.edge() {
            log::info!("Jumped off the {:?} edge", edge);
            state.player.motion = Motion::FallingOff(edge);
            state.events.push(GameEvent::FellOff);
            return;
        }
        state.player.snap_to_cell();
        state.player.motion = Motion::Idle;
    }
    collision::resolve(state, now);
}

fn step_fall(state: &mut GameState, now: f64, drift: Option<Direction>) {
    if let Some(edge) = drift {
        state.player.pos += edge.world_axis() * FALL_OFF_DRIFT;
    }
    state.player.pos.y -= FALL_STEP;
    if state.player.pos.y <= FALL_FLOOR {
        reset_player(state, now, false);
    }
}
