//! Collision detection along the travel axis
//!
//! Lanes are discrete, so every test reduces to "same lane and the z-interval
//! overlaps". No lateral geometry is involved.

use super::state::{Bullet, Obstacle};
use crate::tuning::Tuning;

/// Same lane and strictly closer than `reach` along z
#[inline]
pub fn same_lane_within(lane_a: u8, z_a: f32, lane_b: u8, z_b: f32, reach: f32) -> bool {
    lane_a == lane_b && (z_a - z_b).abs() < reach
}

/// Whether an obstacle overlaps the player's hitbox
pub fn hits_player(obstacle: &Obstacle, player_lane: u8, tuning: &Tuning) -> bool {
    obstacle.active
        && same_lane_within(
            obstacle.lane,
            obstacle.z,
            player_lane,
            tuning.player_z,
            tuning.player_hit_depth,
        )
}

/// Whether a bullet destroys an obstacle. Static obstacles are never hit.
pub fn bullet_hits(bullet: &Bullet, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    bullet.active
        && obstacle.active
        && obstacle.kind.is_shootable()
        && same_lane_within(
            bullet.lane,
            bullet.z,
            obstacle.lane,
            obstacle.z,
            tuning.bullet_hit_radius,
        )
}
