//! Jump arc: a two-cell hop parameterised by progress
//!
//! Progress `t` runs from 0 at take-off to 1 on landing:
//! - horizontal: linear from the take-off coordinate to the landing cell centre
//! - vertical: parabola `GROUND_Y + JUMP_PEAK * 4t(1 - t)`, never below ground

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Cell, Direction};
use crate::consts::*;

/// Slack for float accumulation when deciding the hop is over
const LANDING_EPSILON: f32 = 1e-4;

/// Cells covered by one jump
pub const JUMP_CELLS: i32 = 2;

/// An in-flight jump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpArc {
    pub direction: Direction,
    /// Cell the jump started from
    pub start: Cell,
    /// Coordinate along the jump axis at take-off
    pub from: f32,
    /// Coordinate along the jump axis at landing
    pub to: f32,
    /// Distance covered so far
    pub traveled: f32,
}

impl JumpArc {
    /// Start a jump from `start`, with the player currently at `pos`
    pub fn new(direction: Direction, start: Cell, pos: Vec3) -> Self {
        let (cx, cz) = start.center();
        let sign = if matches!(direction, Direction::Up | Direction::Right) {
            1.0
        } else {
            -1.0
        };
        let (from, center) = if direction.is_row_axis() {
            (pos.x, cx)
        } else {
            (pos.z, cz)
        };
        Self {
            direction,
            start,
            from,
            to: center + sign * JUMP_SPAN,
            traveled: 0.0,
        }
    }

    /// Total horizontal distance of this jump
    pub fn span(&self) -> f32 {
        (self.to - self.from).abs()
    }

    pub fn is_complete(&self) -> bool {
        self.traveled >= self.span() - LANDING_EPSILON
    }

    /// Normalised progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.is_complete() {
            1.0
        } else {
            (self.traveled / self.span()).clamp(0.0, 1.0)
        }
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        self.traveled = (self.traveled + JUMP_STEP).min(self.span());
    }

    /// Coordinate along the jump axis
    pub fn horizontal(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress()
    }

    /// Player height
    pub fn height(&self) -> f32 {
        height_at(self.progress())
    }

    /// Cell the jump will land on
    pub fn landing(&self) -> Cell {
        self.start.offset(self.direction, JUMP_CELLS)
    }

    /// Write the arc position into `pos`
    pub fn apply(&self, pos: &mut Vec3) {
        if self.direction.is_row_axis() {
            pos.x = self.horizontal();
        } else {
            pos.z = self.horizontal();
        }
        pos.y = self.height();
    }
}

/// Height on the arc for progress `t`
pub fn height_at(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (GROUND_Y + JUMP_PEAK * 4.0 * t * (1.0 - t)).max(GROUND_Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered(cell: Cell) -> Vec3 {
        let (x, z) = cell.center();
        Vec3::new(x, GROUND_Y, z)
    }

    #[test]
    fn test_arc_bounds() {
        assert!((height_at(0.0) - GROUND_Y).abs() < 1e-6);
        assert!((height_at(0.5) - (GROUND_Y + JUMP_PEAK)).abs() < 1e-6);
        assert!((height_at(1.0) - GROUND_Y).abs() < 1e-6);
        assert!(height_at(1.5) >= GROUND_Y);
    }

    #[test]
    fn test_centered_jump_takes_eighty_ticks() {
        let start = Cell::new(3, 3);
        let mut jump = JumpArc::new(Direction::Up, start, centered(start));
        assert!((jump.span() - JUMP_SPAN).abs() < 1e-5);

        for _ in 0..79 {
            jump.advance();
            assert!(!jump.is_complete());
        }
        jump.advance();
        assert!(jump.is_complete());
        assert_eq!(jump.landing(), Cell::new(5, 3));
        assert!((jump.horizontal() - Cell::new(5, 3).center().0).abs() < 1e-5);
        assert!((jump.height() - GROUND_Y).abs() < 1e-6);
    }

    #[test]
    fn test_off_center_takeoff_shortens_span() {
        let start = Cell::new(2, 2);
        let mut pos = centered(start);
        pos.z += 0.5;
        let jump = JumpArc::new(Direction::Right, start, pos);
        assert!((jump.span() - 3.5).abs() < 1e-5);
        assert_eq!(jump.landing(), Cell::new(2, 4));
    }

    #[test]
    fn test_backward_jump() {
        let start = Cell::new(6, 6);
        let mut jump = JumpArc::new(Direction::Left, start, centered(start));
        let mut pos = centered(start);
        for _ in 0..40 {
            jump.advance();
        }
        jump.apply(&mut pos);
        assert!((pos.z - (start.center().1 - 2.0)).abs() < 1e-4);
        assert!((pos.y - (GROUND_Y + JUMP_PEAK)).abs() < 1e-3);
        assert_eq!(jump.landing(), Cell::new(6, 4));
    }
}
