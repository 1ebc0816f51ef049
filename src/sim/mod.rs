//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per frame, real time accumulated into the state clock
//! - Seeded RNG only
//! - Ordered sets for obstacles and coins
//! - No rendering or platform dependencies

pub mod arc;
pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod lifecycle;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arc::JumpArc;
pub use grid::{Grid, moving_tile_offset, tile_odds};
pub use lifecycle::{declare_win, reset_game, reset_player};
pub use state::{
    Banner, Cell, Direction, GameEvent, GamePhase, GameState, HeldKeys, Motion, Player,
};
pub use tick::{InputEvent, TickInput, tick};
