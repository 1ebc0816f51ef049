//! Per-frame simulation tick
//!
//! One call per rendered frame. Motion advances a fixed amount per tick;
//! timers (win, game over, reset animation, bonus life) run on the
//! accumulated real time passed in as `dt`.

use super::state::{Banner, Direction, GameState};
use super::{autopilot, lifecycle, player, spawn};
use crate::consts::*;

/// Discrete input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Direction),
    Release(Direction),
    /// Next camera view
    CycleView,
    /// Next camera position within the current view
    CycleSubView,
    SpeedUp,
    SpeedDown,
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key events since the previous tick, in order
    pub events: Vec<InputEvent>,
    /// Jump modifier is down (checked when a direction is pressed)
    pub jump_held: bool,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

impl TickInput {
    pub fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;
    state.clock += f64::from(dt.max(0.0));
    let now = state.clock;

    // Demo mode adds its own key events
    let mut input = input.clone();
    if input.autopilot && state.lost_at.is_none() {
        let (events, jump) = autopilot::drive(state);
        input.events.extend(events);
        input.jump_held |= jump;
    }

    // Keys, camera and speed
    for event in &input.events {
        apply_event(state, *event, input.jump_held);
    }

    // HUD banners
    advance_banner(&mut state.coin_banner);
    advance_banner(&mut state.life_banner);

    // Win, game over and reset animation timeouts
    lifecycle::update_timers(state, now);
    if state.lost_at.is_some() {
        // Board is frozen until the fresh game
        return;
    }

    // Movement and collisions
    player::advance(state, now);

    // Obstacle/coin cycle
    spawn::update(state);

    if state.won_at.is_none() && state.lost_at.is_none() {
        lifecycle::maybe_bonus_life(state, now);
    }
}

fn apply_event(state: &mut GameState, event: InputEvent, jump_held: bool) {
    match event {
        InputEvent::Press(dir) => player::press(state, dir, jump_held),
        InputEvent::Release(dir) => player::release(state, dir),
        InputEvent::CycleView => state.camera.cycle_view(),
        InputEvent::CycleSubView => state.camera.cycle_sub_view(),
        InputEvent::SpeedUp => {
            if state.speed < MAX_SPEED {
                state.speed += 1;
            }
        }
        InputEvent::SpeedDown => {
            state.speed = state.speed.saturating_sub(1);
        }
        InputEvent::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
        }
    }
}

fn advance_banner(slot: &mut Option<Banner>) {
    if let Some(banner) = slot {
        if !banner.advance() {
            *slot = None;
        }
    }
}
