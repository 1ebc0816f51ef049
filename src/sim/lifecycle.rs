//! Lives, levels and the timers that move between them

use rand::Rng;

use super::spawn;
use super::state::{Banner, GameEvent, GameState, Motion};
use crate::consts::*;

/// Handle a failure (obstacle, unsafe tile, fall)
///
/// Grounded failures first play a reset animation; the consequences are
/// applied when it ends (`skip_animation = true`). Falls apply immediately.
/// Calls made while the animation is running are ignored.
pub fn reset_player(state: &mut GameState, now: f64, skip_animation: bool) {
    let motion = state.player.motion;
    if !skip_animation && !motion.is_falling() && !motion.is_animating() {
        state.player.motion = Motion::ResetAnimating { since: now };
        return;
    }
    if motion.is_animating() && !skip_animation {
        return;
    }
    apply_reset(state, now);
}

fn apply_reset(state: &mut GameState, now: f64) {
    if state.lost_at.is_none() && state.lives > 0 {
        state.lives -= 1;
        state.life_banner = Some(Banner::default());
        state.events.push(GameEvent::LifeLost { lives: state.lives });
        log::info!("Life lost, {} remaining", state.lives);
    }

    if state.lives == 0 {
        state.level = 1;
        state.grid.regenerate(state.level, &mut state.rng);
        // The spawner is frozen until the next game; reroll against the new board now
        spawn::regenerate(state);
        if state.lost_at.is_none() {
            state.lost_at = Some(now);
            state.events.push(GameEvent::GameOver);
            log::info!("Game over with {} points", state.points);
        }
        state.player.motion = Motion::Idle;
        state.player.held.clear();
        return;
    }

    state.player.respawn();
}

/// Start the next level. After a game over this is a fresh game.
pub fn reset_game(state: &mut GameState, now: f64) {
    state.level += 1;
    state.points += LEVEL_POINTS;
    state.grid.regenerate(state.level, &mut state.rng);

    if state.lost_at.is_some() {
        state.lives = START_LIVES;
        state.points = 0;
    }
    state.lost_at = None;
    state.won_at = None;
    state.game_start = now;

    state.player.held.clear();
    state.player.respawn();
    spawn::rewind(state);

    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} started (lives {}, points {})",
        state.level,
        state.lives,
        state.points
    );
}

/// Player reached the goal
pub fn declare_win(state: &mut GameState, now: f64) {
    state.player.motion = Motion::Won;
    if state.won_at.is_none() {
        state.won_at = Some(now);
        state.events.push(GameEvent::LevelWon { level: state.level });
        log::info!("Level {} cleared in {:.1}s", state.level, state.elapsed());
    }
}

/// Fire any timer that has run out. Returns true if a reset happened.
pub fn update_timers(state: &mut GameState, now: f64) -> bool {
    if let Some(lost) = state.lost_at {
        if now - lost >= LOSE_HOLD_SECS {
            reset_game(state, now);
            return true;
        }
        return false;
    }

    match state.player.motion {
        Motion::Won => match state.won_at {
            Some(won) if now - won >= WIN_HOLD_SECS => {
                reset_game(state, now);
                true
            }
            _ => false,
        },
        Motion::ResetAnimating { since } if now - since >= RESET_ANIMATION_SECS => {
            reset_player(state, now, true);
            true
        }
        _ => false,
    }
}

/// Occasional extra life for walking the diagonals
///
/// Rolls at most once per BONUS_LIFE_INTERVAL_SECS, and only while the
/// player stands on a diagonal cell.
pub fn maybe_bonus_life(state: &mut GameState, now: f64) {
    if !state.player.cell.on_diagonal() {
        return;
    }
    if now - state.last_bonus_roll < BONUS_LIFE_INTERVAL_SECS {
        return;
    }
    state.last_bonus_roll = now;

    if state.rng.random_range(0..BONUS_LIFE_ODDS) == 0 {
        state.lives += 1;
        state.life_banner = Some(Banner::default());
        state.events.push(GameEvent::BonusLife { lives: state.lives });
        log::info!("Bonus life! {} lives", state.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Cell, Direction, GamePhase};

    #[test]
    fn test_reset_game_twice_is_additive() {
        let mut state = GameState::new(1);
        state.points = 60;
        let level = state.level;
        let points = state.points;

        reset_game(&mut state, 1.0);
        reset_game(&mut state, 2.0);

        assert_eq!(state.level, level + 2);
        assert_eq!(state.points, points + 2 * LEVEL_POINTS);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.game_start, 2.0);
    }

    #[test]
    fn test_reset_game_respawns_and_clears_keys() {
        let mut state = GameState::new(2);
        state.player.place_at(Cell::new(9, 9));
        state.player.held.press(Direction::Up);
        declare_win(&mut state, 3.0);

        reset_game(&mut state, 9.0);
        assert_eq!(state.player.cell, Cell::START);
        assert_eq!(state.player.motion, Motion::Idle);
        assert_eq!(state.player.held.first(), None);
        assert_eq!(state.won_at, None);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_animation_then_reset() {
        let mut state = GameState::new(3);
        state.player.place_at(Cell::new(2, 3));

        reset_player(&mut state, 10.0, false);
        assert_eq!(state.player.motion, Motion::ResetAnimating { since: 10.0 });

        // Re-triggering during the animation changes nothing
        reset_player(&mut state, 11.0, false);
        assert_eq!(state.player.motion, Motion::ResetAnimating { since: 10.0 });
        assert_eq!(state.lives, START_LIVES);

        assert!(!update_timers(&mut state, 12.4));
        assert!(update_timers(&mut state, 12.5));
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.cell, Cell::START);
        assert_eq!(state.player.motion, Motion::Idle);
        assert!(state.life_banner.is_some());
    }

    #[test]
    fn test_fall_resets_without_animation() {
        let mut state = GameState::new(4);
        state.player.motion = Motion::Falling;
        reset_player(&mut state, 0.0, false);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.motion, Motion::Idle);
    }

    #[test]
    fn test_last_life_loses_game() {
        let mut state = GameState::new(5);
        state.level = 4;
        state.lives = 1;
        state.points = 340;
        state.player.motion = Motion::Falling;
        let board_before = state.grid.clone();

        reset_player(&mut state, 7.0, false);
        assert_eq!(state.lives, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lost_at, Some(7.0));
        assert_eq!(state.points, 340);
        assert_ne!(state.grid, board_before);
        assert!(state.events.contains(&GameEvent::GameOver));
        assert!(!state.coins.is_empty());

        // Further failures while lost do not touch lives or the timestamp
        state.player.motion = Motion::Falling;
        reset_player(&mut state, 8.0, false);
        assert_eq!(state.lives, 0);
        assert_eq!(state.lost_at, Some(7.0));

        // Timeout starts a fresh game
        assert!(!update_timers(&mut state, 11.0));
        assert!(update_timers(&mut state, 12.0));
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.points, 0);
        assert_eq!(state.lost_at, None);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_game_over_hazards_sit_on_solid_tiles() {
        for seed in 0..200 {
            let mut state = GameState::new(seed);
            state.level = 6;
            state.grid.regenerate(state.level, &mut state.rng);
            spawn::regenerate(&mut state);
            state.lives = 1;
            state.player.motion = Motion::Falling;

            reset_player(&mut state, 1.0, false);
            assert_eq!(state.phase(), GamePhase::Lost);
            for cell in state.obstacles.iter().chain(state.coins.iter()) {
                assert!(state.grid.is_solid(*cell), "seed {} cell {:?}", seed, cell);
            }
            assert!(state.obstacles.is_disjoint(&state.coins));
        }
    }

    #[test]
    fn test_win_timer() {
        let mut state = GameState::new(6);
        state.player.place_at(Cell::GOAL);
        declare_win(&mut state, 20.0);
        declare_win(&mut state, 21.0);
        assert_eq!(state.won_at, Some(20.0));

        assert!(!update_timers(&mut state, 24.9));
        assert!(update_timers(&mut state, 25.0));
        assert_eq!(state.level, 2);
        assert_eq!(state.points, LEVEL_POINTS);
    }

    #[test]
    fn test_bonus_life_only_on_diagonal_and_rate_limited() {
        let mut state = GameState::new(9);
        state.player.place_at(Cell::new(0, 1));
        maybe_bonus_life(&mut state, 5.0);
        assert_eq!(state.last_bonus_roll, 0.0);

        state.player.place_at(Cell::new(3, 3));
        maybe_bonus_life(&mut state, 5.0);
        assert_eq!(state.last_bonus_roll, 5.0);
        maybe_bonus_life(&mut state, 5.5);
        assert_eq!(state.last_bonus_roll, 5.0);

        // Over many rolls the player gains some lives and never loses any
        let mut now = 6.0;
        for _ in 0..5000 {
            maybe_bonus_life(&mut state, now);
            now += BONUS_LIFE_INTERVAL_SECS;
        }
        assert!(state.lives > START_LIVES);
    }
}
