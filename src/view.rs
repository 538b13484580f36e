//! Presentation-side state
//!
//! The simulation only knows discrete lanes. The ship on screen glides
//! between lanes and banks while it does; that motion lives here and is
//! never fed back into collision tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::lane_to_x;
use crate::tuning::Tuning;

/// Height at which ships, obstacles and bullets float above the road
pub const ENTITY_HEIGHT: f32 = 0.5;
/// How quickly the ship closes on its lane (per second)
pub const FOLLOW_RATE: f32 = 10.0;
/// Roll per world unit of remaining lateral distance
pub const TILT_FACTOR: f32 = 0.1;

/// Exponential-style smoothing toward `target`.
///
/// The blend factor is clamped to 1 so a long frame lands exactly on the
/// target instead of overshooting.
#[inline]
pub fn follow(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    let t = (dt * rate).clamp(0.0, 1.0);
    if t >= 1.0 {
        return target;
    }
    current + (target - current) * t
}

/// World-space position of anything sitting in `lane` at depth `z`
#[inline]
pub fn entity_world_pos(lane: u8, z: f32, tuning: &Tuning) -> Vec3 {
    Vec3::new(lane_to_x(lane, tuning), ENTITY_HEIGHT, z)
}

/// Rendered transform of the player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVisual {
    pub position: Vec3,
    /// Bank around the travel axis (radians)
    pub roll: f32,
    /// Yaw into the turn (radians)
    pub yaw: f32,
}

impl PlayerVisual {
    /// Ship parked on its starting lane
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: entity_world_pos(tuning.start_lane, tuning.player_z, tuning),
            roll: 0.0,
            yaw: 0.0,
        }
    }

    /// Glide toward `lane` and bank by how far there is left to go
    pub fn update(&mut self, lane: u8, dt: f32, tuning: &Tuning) {
        let target_x = lane_to_x(lane, tuning);
        self.position.x = follow(self.position.x, target_x, dt, FOLLOW_RATE);
        self.roll = (self.position.x - target_x) * TILT_FACTOR;
        self.yaw = self.roll * 0.5;
    }

    /// Snap back to the start lane (new run)
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }
}
