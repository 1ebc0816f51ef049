//! Per-tick checks of the player's cell against hazards, coins and tiles
//!
//! Runs after the player has moved. Order matters: an obstacle wins over
//! everything, coins are collected even on the way to a fall.

use super::lifecycle::reset_player;
use super::state::{Banner, GameEvent, GameState, Motion};
use crate::consts::*;

/// Is a player at `player_y` too low to pass over a moving tile at `tile_y`?
#[inline]
pub fn clears_moving_tile(player_y: f32, tile_y: f32) -> bool {
    player_y - 1.0 > tile_y + 3.0
}

/// Check the player's current cell and apply the consequences
///
/// Obstacles and unsafe moving tiles go through `reset_player`; a grounded
/// player over a hole starts falling.
pub fn resolve(state: &mut GameState, now: f64) {
    let cell = state.player.cell;
    let airborne = state.player.motion.is_jumping();

    if state.obstacles.contains(&cell) {
        log::info!("Hit obstacle at ({}, {})", cell.row, cell.col);
        state.events.push(GameEvent::ObstacleHit(cell));
        reset_player(state, now, false);
        return;
    }

    if state.coins.remove(&cell) {
        state.points += COIN_POINTS;
        state.coin_banner = Some(Banner::default());
        state.events.push(GameEvent::CoinCollected(cell));
        log::debug!("Coin at ({}, {}), points {}", cell.row, cell.col, state.points);
    }

    if !state.grid.is_present(cell) && !airborne {
        state.player.snap_to_cell();
        state.player.motion = Motion::Falling;
        state.events.push(GameEvent::FellOff);
        return;
    }

    if state.grid.is_moving(cell)
        && (!airborne || !clears_moving_tile(state.player.pos.y, state.moving_tile_y()))
    {
        log::info!("Unsafe moving tile at ({}, {})", cell.row, cell.col);
        state.events.push(GameEvent::UnsafeTile(cell));
        reset_player(state, now, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arc::JumpArc;
    use crate::sim::state::{Cell, Direction};

    fn state_at(cell: Cell) -> GameState {
        let mut state = GameState::new(42);
        state.obstacles.clear();
        state.coins.clear();
        state.player.place_at(cell);
        state
    }

    #[test]
    fn test_obstacle_starts_reset_animation() {
        let mut state = state_at(Cell::new(2, 3));
        state.grid.set_present(Cell::new(2, 3), true);
        state.obstacles.insert(Cell::new(2, 3));

        resolve(&mut state, 1.0);
        assert_eq!(state.events, vec![GameEvent::ObstacleHit(Cell::new(2, 3))]);
        assert_eq!(state.player.motion, Motion::ResetAnimating { since: 1.0 });
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_obstacle_resets_mid_jump() {
        let cell = Cell::new(4, 4);
        let mut state = state_at(cell);
        state.obstacles.insert(cell);
        state.player.motion =
            Motion::Jumping(JumpArc::new(Direction::Up, Cell::new(3, 4), state.player.pos));
        resolve(&mut state, 0.5);
        assert!(state.player.motion.is_animating());
    }

    #[test]
    fn test_coin_pickup() {
        let cell = Cell::new(4, 5);
        let mut state = state_at(cell);
        state.grid.set_present(cell, true);
        state.grid.set_moving(cell, false);
        state.coins.insert(cell);

        resolve(&mut state, 0.0);
        assert_eq!(state.player.motion, Motion::Idle);
        assert_eq!(state.points, COIN_POINTS);
        assert!(!state.coins.contains(&cell));
        assert!(state.coin_banner.is_some());
        assert_eq!(state.events, vec![GameEvent::CoinCollected(cell)]);

        // Collected once only
        resolve(&mut state, 0.0);
        assert_eq!(state.points, COIN_POINTS);
    }

    #[test]
    fn test_missing_tile_falls_unless_jumping() {
        let cell = Cell::new(6, 2);
        let mut state = state_at(cell);
        state.grid.set_present(cell, false);

        state.player.motion =
            Motion::Jumping(JumpArc::new(Direction::Up, Cell::new(5, 2), state.player.pos));
        resolve(&mut state, 0.0);
        assert!(state.player.motion.is_jumping());
        assert!(state.events.is_empty());

        // Grounded over the hole: snapped to the centre and dropping
        state.player.motion = Motion::Idle;
        state.player.pos.x += 0.4;
        resolve(&mut state, 0.0);
        assert_eq!(state.player.motion, Motion::Falling);
        assert_eq!(state.player.pos.x, cell.center().0);
        assert_eq!(state.events, vec![GameEvent::FellOff]);
    }

    #[test]
    fn test_moving_tile_rules() {
        let cell = Cell::new(1, 5);
        let mut state = state_at(cell);
        state.grid.set_present(cell, true);
        state.grid.set_moving(cell, true);
        // Tile at rest (y = -1): clearance needs player y > 3; the quarter
        // point of the arc sits at 5.7
        state.time_ticks = 0;

        // High jump over a low tile is safe
        let mut jump = JumpArc::new(Direction::Right, Cell::new(1, 4), state.player.pos);
        jump.traveled = jump.span() / 4.0;
        state.player.motion = Motion::Jumping(jump);
        state.player.pos.y = jump.height();
        resolve(&mut state, 0.0);
        assert!(state.player.motion.is_jumping());
        assert!(state.events.is_empty());

        // Same jump over a raised tile is not
        state.time_ticks = TILE_HALF_PERIOD;
        resolve(&mut state, 0.0);
        assert_eq!(state.events, vec![GameEvent::UnsafeTile(cell)]);
        assert!(state.player.motion.is_animating());

        // Standing on a moving tile is never safe
        let mut state = state_at(cell);
        state.grid.set_present(cell, true);
        state.grid.set_moving(cell, true);
        resolve(&mut state, 0.0);
        assert_eq!(state.events, vec![GameEvent::UnsafeTile(cell)]);
        assert!(state.player.motion.is_animating());
    }

    #[test]
    fn test_clearance_threshold() {
        assert!(clears_moving_tile(6.2, 2.0));
        assert!(!clears_moving_tile(6.0, 2.0));
        assert!(!clears_moving_tile(GROUND_Y, 0.5));
    }
}
