//! Difficulty ramp and obstacle rolls
//!
//! Difficulty is recomputed from the score every tick; nothing here caches.

use rand::Rng;

use super::state::ObstacleKind;
use crate::tuning::Tuning;

/// Linear, unbounded difficulty multiplier (1.0 at score 0)
#[inline]
pub fn difficulty(score: u64, tuning: &Tuning) -> f32 {
    1.0 + score as f32 / tuning.difficulty_score_step as f32
}

/// Obstacle closing speed for the current score
#[inline]
pub fn obstacle_speed(score: u64, tuning: &Tuning) -> f32 {
    tuning.base_speed * difficulty(score, tuning)
}

/// Seconds between spawns for the current score, floored at `min_spawn_interval`
#[inline]
pub fn spawn_interval(score: u64, tuning: &Tuning) -> f32 {
    (tuning.base_spawn_interval / difficulty(score, tuning)).max(tuning.min_spawn_interval)
}

/// Pick a lane and kind for a new obstacle.
///
/// Lanes are chosen independently every spawn, so several obstacles can
/// occupy every lane at once.
pub fn roll_obstacle<R: Rng>(rng: &mut R, tuning: &Tuning) -> (u8, ObstacleKind) {
    let lane = rng.random_range(0..tuning.lane_count);
    let kind = if rng.random_bool(tuning.enemy_chance) {
        ObstacleKind::Enemy
    } else {
        ObstacleKind::Static
    };
    (lane, kind)
}
