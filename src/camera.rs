//! Camera rig: which view is active and where it looks from
//!
//! Views cycle Overview -> Top -> Follow -> FirstPerson. The overview has
//! eight fixed vantage points stepped through with the sub-view control;
//! the other views ignore the sub-view.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::state::Player;

/// Camera views in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraView {
    /// Fixed positions around the board
    #[default]
    Overview,
    /// High above the board
    Top,
    /// Behind and above the player
    Follow,
    /// From the player's head
    FirstPerson,
}

impl CameraView {
    pub const ALL: [CameraView; 4] = [
        CameraView::Overview,
        CameraView::Top,
        CameraView::Follow,
        CameraView::FirstPerson,
    ];

    pub fn next(self) -> Self {
        match self {
            CameraView::Overview => CameraView::Top,
            CameraView::Top => CameraView::Follow,
            CameraView::Follow => CameraView::FirstPerson,
            CameraView::FirstPerson => CameraView::Overview,
        }
    }

    pub fn index(self) -> usize {
        match self {
            CameraView::Overview => 0,
            CameraView::Top => 1,
            CameraView::Follow => 2,
            CameraView::FirstPerson => 3,
        }
    }
}

/// Overview eye positions, indexed by sub-view
const OVERVIEW_EYES: [[f32; 3]; 8] = [
    [-18.0, 16.0, 10.0],
    [-13.0, 16.0, 15.0],
    [-8.0, 18.0, 20.0],
    [-3.0, 14.0, 25.0],
    [16.0, 16.0, 20.0],
    [20.0, 16.0, -25.0],
    [5.0, 16.0, -30.0],
    [-23.0, 18.0, -10.0],
];

const TOP_EYE: Vec3 = Vec3::new(-5.0, 28.0, 0.0);

const FOLLOW_BACK: f32 = 4.0;
const FOLLOW_HEIGHT: f32 = 10.0;
const HEAD_HEIGHT: f32 = 4.0;
const LOOK_AHEAD: f32 = 2.0;
const LOOK_UP: f32 = 1.8;

/// Current camera selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CameraRig {
    pub view: CameraView,
    /// Overview vantage point, 0..8
    pub sub_view: usize,
}

impl CameraRig {
    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
        log::debug!("Camera view {:?}", self.view);
    }

    pub fn cycle_sub_view(&mut self) {
        self.sub_view = (self.sub_view + 1) % OVERVIEW_EYES.len();
    }

    pub fn view_index(&self) -> usize {
        self.view.index()
    }

    /// Eye and look-at target for the active view
    pub fn eye_target(&self, player: &Player) -> (Vec3, Vec3) {
        let pos = player.pos;
        let facing = player.facing.world_axis();
        match self.view {
            CameraView::Overview => {
                let eye = Vec3::from_array(OVERVIEW_EYES[self.sub_view % OVERVIEW_EYES.len()]);
                (eye, Vec3::ZERO)
            }
            CameraView::Top => (TOP_EYE, Vec3::ZERO),
            CameraView::Follow => {
                let mut eye = pos - facing * FOLLOW_BACK;
                eye.y = pos.y + FOLLOW_HEIGHT;
                (eye, Vec3::new(pos.x, 0.0, pos.z))
            }
            CameraView::FirstPerson => {
                let eye = pos + Vec3::Y * HEAD_HEIGHT;
                let target = pos + facing * LOOK_AHEAD + Vec3::Y * LOOK_UP;
                (eye, target)
            }
        }
    }

    /// Right-handed view matrix for the active view
    pub fn view_matrix(&self, player: &Player) -> Mat4 {
        let (eye, target) = self.eye_target(player);
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;
    use crate::sim::state::{Cell, Direction};

    #[test]
    fn test_view_cycle_wraps() {
        let mut rig = CameraRig::default();
        for expected in [
            CameraView::Top,
            CameraView::Follow,
            CameraView::FirstPerson,
            CameraView::Overview,
        ] {
            rig.cycle_view();
            assert_eq!(rig.view, expected);
        }
    }

    #[test]
    fn test_sub_view_cycles_overview_eyes() {
        let mut rig = CameraRig::default();
        let player = Player::default();
        let (first, target) = rig.eye_target(&player);
        assert_eq!(first, Vec3::new(-18.0, 16.0, 10.0));
        assert_eq!(target, Vec3::ZERO);

        for _ in 0..7 {
            rig.cycle_sub_view();
        }
        assert_eq!(rig.eye_target(&player).0, Vec3::new(-23.0, 18.0, -10.0));
        rig.cycle_sub_view();
        assert_eq!(rig.sub_view, 0);
    }

    #[test]
    fn test_follow_sits_behind_player() {
        let rig = CameraRig {
            view: CameraView::Follow,
            sub_view: 0,
        };
        let mut player = Player::default();
        player.place_at(Cell::new(3, 4));
        player.facing = Direction::Up;
        let (eye, target) = rig.eye_target(&player);
        assert_eq!(eye.x, player.pos.x - FOLLOW_BACK);
        assert_eq!(eye.z, player.pos.z);
        assert!((eye.y - (GROUND_Y + FOLLOW_HEIGHT)).abs() < 1e-5);
        assert_eq!(target, Vec3::new(player.pos.x, 0.0, player.pos.z));
    }

    #[test]
    fn test_first_person_looks_ahead() {
        let rig = CameraRig {
            view: CameraView::FirstPerson,
            sub_view: 3,
        };
        let player = Player::default();
        let (eye, target) = rig.eye_target(&player);
        assert!((eye.y - (GROUND_Y + HEAD_HEIGHT)).abs() < 1e-5);
        // Default facing is +Z
        assert!((target.z - (player.pos.z + LOOK_AHEAD)).abs() < 1e-5);
        assert!((target.y - (GROUND_Y + LOOK_UP)).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let rig = CameraRig::default();
        let player = Player::default();
        let (eye, _) = rig.eye_target(&player);
        let view = rig.view_matrix(&player);
        let at_eye = view.transform_point3(eye);
        assert!(at_eye.length() < 1e-4);
        // The target lies straight down the -Z axis in view space
        let at_target = view.transform_point3(Vec3::ZERO);
        assert!(at_target.z < 0.0);
        assert!(at_target.x.abs() < 1e-4 && at_target.y.abs() < 1e-4);
    }
}
