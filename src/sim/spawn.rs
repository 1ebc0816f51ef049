//! Obstacle and coin placement
//!
//! Both sets are rolled together every SPAWN_PERIOD_TICKS. Sampling is a
//! fixed number of attempts, so a crowded board simply ends up with fewer
//! hazards; repeated draws of the same cell collapse in the set.

use std::collections::BTreeSet;

use rand::Rng;

use super::grid::Grid;
use super::state::{Cell, GameState};
use crate::consts::*;

/// Can `cell` hold an obstacle or a coin?
fn placeable(grid: &Grid, cell: Cell, player: Cell, other: &BTreeSet<Cell>) -> bool {
    cell != Cell::START
        && cell != Cell::GOAL
        && grid.is_solid(cell)
        && cell != player
        && !other.contains(&cell)
}

fn sample<R: Rng>(
    rng: &mut R,
    attempts: u32,
    grid: &Grid,
    player: Cell,
    other: &BTreeSet<Cell>,
) -> BTreeSet<Cell> {
    let mut placed = BTreeSet::new();
    for _ in 0..attempts {
        let row = rng.random_range(0..GRID_SIZE);
        let col = rng.random_range(0..GRID_SIZE);
        let cell = Cell::new(row, col);
        if placeable(grid, cell, player, other) {
            placed.insert(cell);
        }
    }
    placed
}

/// Replace the obstacle set. Avoids the current coin set.
pub fn regenerate_obstacles(state: &mut GameState) {
    state.obstacles = sample(
        &mut state.rng,
        OBSTACLE_ATTEMPTS,
        &state.grid,
        state.player.cell,
        &state.coins,
    );
}

/// Replace the coin set. Avoids the current obstacle set.
pub fn regenerate_coins(state: &mut GameState) {
    state.coins = sample(
        &mut state.rng,
        COIN_ATTEMPTS,
        &state.grid,
        state.player.cell,
        &state.obstacles,
    );
}

/// Roll obstacles, then coins against the fresh obstacles
pub fn regenerate(state: &mut GameState) {
    regenerate_obstacles(state);
    regenerate_coins(state);
    log::debug!(
        "Spawned {} obstacles, {} coins",
        state.obstacles.len(),
        state.coins.len()
    );
}

/// Per-tick cycle driver
pub fn update(state: &mut GameState) {
    if state.spawn_timer >= SPAWN_PERIOD_TICKS {
        state.spawn_timer = 0;
    }
    if state.spawn_timer == 0 {
        regenerate(state);
    }
    state.spawn_timer += 1;
}

/// Make the next `update` reroll immediately (used after a new board)
pub fn rewind(state: &mut GameState) {
    state.spawn_timer = 0;
}
