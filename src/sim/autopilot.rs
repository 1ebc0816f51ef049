//! Demo mode: plays the board by itself
//!
//! Plans a shortest route to the goal over safe cells with walks (one cell)
//! and hops (two cells), then turns the first step into key presses.

use std::collections::VecDeque;

use super::arc::JUMP_CELLS;
use super::state::{Cell, Direction, GameState, Motion};
use super::tick::InputEvent;
use crate::consts::GRID_SIZE;

/// First move of a planned route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Walk(Direction),
    Hop(Direction),
}

fn safe(state: &GameState, cell: Cell) -> bool {
    state.grid.is_solid(cell) && !state.obstacles.contains(&cell)
}

/// A hop may fly over holes but not over obstacles or bobbing tiles
fn can_fly_over(state: &GameState, cell: Cell) -> bool {
    !state.obstacles.contains(&cell) && !state.grid.is_moving(cell)
}

fn slot(cell: Cell) -> usize {
    (cell.row * GRID_SIZE + cell.col) as usize
}

/// Breadth-first search from the player's cell to the goal
pub fn plan(state: &GameState) -> Option<Step> {
    let start = state.player.cell;
    if !start.in_bounds() || start == Cell::GOAL {
        return None;
    }

    let mut first: Vec<Option<Step>> = vec![None; (GRID_SIZE * GRID_SIZE) as usize];
    let mut seen = vec![false; first.len()];
    let mut queue = VecDeque::new();
    seen[slot(start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for dir in Direction::ALL {
            let walk = cell.offset(dir, 1);
            let hop = cell.offset(dir, JUMP_CELLS);
            let candidates = [
                (walk, Step::Walk(dir), true),
                (hop, Step::Hop(dir), can_fly_over(state, walk)),
            ];
            for (next, step, allowed) in candidates {
                if !allowed || !next.in_bounds() || seen[slot(next)] || !safe(state, next) {
                    continue;
                }
                seen[slot(next)] = true;
                first[slot(next)] = if cell == start { Some(step) } else { first[slot(cell)] };
                if next == Cell::GOAL {
                    return first[slot(next)];
                }
                queue.push_back(next);
            }
        }
    }
    None
}

/// Key events for this tick, plus whether the jump modifier is held
pub fn drive(state: &GameState) -> (Vec<InputEvent>, bool) {
    match state.player.motion {
        Motion::Idle => match plan(state) {
            Some(Step::Walk(dir)) => (vec![InputEvent::Press(dir)], false),
            Some(Step::Hop(dir)) => (vec![InputEvent::Press(dir)], true),
            None => (Vec::new(), false),
        },
        Motion::Moving(dir) => match plan(state) {
            Some(Step::Walk(next)) if next == dir => (Vec::new(), false),
            _ => (vec![InputEvent::Release(dir)], false),
        },
        _ => (Vec::new(), false),
    }
}
