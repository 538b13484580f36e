//! Data-driven game balance
//!
//! Every number the simulation reasons about lives in [`Tuning`]. A session is
//! built with one tuning value and never mutates it, so tests can inject their
//! own numbers without touching production balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game balance and geometry constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    /// Number of discrete lanes
    pub lane_count: u8,
    /// World units between adjacent lane centres
    pub lane_width: f32,
    /// Lane the player occupies when a run starts
    pub start_lane: u8,

    // === Speeds ===
    /// Obstacle closing speed at difficulty 1.0 (units/s)
    pub base_speed: f32,
    /// Bullet speed toward the spawn region (units/s)
    pub bullet_speed: f32,

    // === Spawning ===
    /// Seconds between spawns at difficulty 1.0
    pub base_spawn_interval: f32,
    /// Spawn interval never drops below this
    pub min_spawn_interval: f32,
    /// Score needed for each +1.0 of difficulty
    pub difficulty_score_step: u64,
    /// Probability that a spawned obstacle is a shootable enemy
    pub enemy_chance: f64,

    // === Track coordinates ===
    /// Where obstacles appear
    pub spawn_z: f32,
    /// Fixed player position along the travel axis
    pub player_z: f32,
    /// Obstacles past this coordinate have been survived
    pub despawn_z: f32,
    /// Bullets despawn once they travel this far beyond `spawn_z`
    pub bullet_despawn_margin: f32,
    /// Bullets leave the ship this far ahead of `player_z`
    pub bullet_offset: f32,

    // === Hitboxes ===
    /// Player hitbox half-depth
    pub player_hit_depth: f32,
    /// Bullet vs obstacle collision radius
    pub bullet_hit_radius: f32,

    // === Scoring ===
    /// Awarded when an obstacle passes the player
    pub survive_score: u64,
    /// Awarded when a bullet destroys an enemy
    pub kill_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: 6,
            lane_width: 2.5,
            start_lane: 2,

            base_speed: 40.0,
            bullet_speed: 80.0,

            base_spawn_interval: 0.8,
            min_spawn_interval: 0.3,
            difficulty_score_step: 500,
            enemy_chance: 0.7,

            spawn_z: -120.0,
            player_z: 0.0,
            despawn_z: 20.0,
            bullet_despawn_margin: 20.0,
            bullet_offset: 2.0,

            player_hit_depth: 1.5,
            bullet_hit_radius: 2.0,

            survive_score: 10,
            kill_score: 50,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    /// The JSON could not be parsed
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the simulation cannot run with
    #[error("invalid tuning field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be finite and greater than zero",
        })
    }
}

impl Tuning {
    /// Parse a tuning override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the simulation can run with these numbers
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_count == 0 {
            return Err(TuningError::Invalid {
                field: "lane_count",
                reason: "at least one lane is required",
            });
        }
        if self.start_lane >= self.lane_count {
            return Err(TuningError::Invalid {
                field: "start_lane",
                reason: "must be below lane_count",
            });
        }

        positive("lane_width", self.lane_width)?;
        positive("base_speed", self.base_speed)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("base_spawn_interval", self.base_spawn_interval)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        positive("bullet_despawn_margin", self.bullet_despawn_margin)?;
        positive("player_hit_depth", self.player_hit_depth)?;
        positive("bullet_hit_radius", self.bullet_hit_radius)?;

        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval",
                reason: "must not exceed base_spawn_interval",
            });
        }
        if self.difficulty_score_step == 0 {
            return Err(TuningError::Invalid {
                field: "difficulty_score_step",
                reason: "must be non-zero",
            });
        }
        if !(0.0..=1.0).contains(&self.enemy_chance) {
            return Err(TuningError::Invalid {
                field: "enemy_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if !self.bullet_offset.is_finite() {
            return Err(TuningError::Invalid {
                field: "bullet_offset",
                reason: "must be finite",
            });
        }
        if !(self.spawn_z.is_finite() && self.spawn_z < self.player_z) {
            return Err(TuningError::Invalid {
                field: "spawn_z",
                reason: "must lie ahead of player_z",
            });
        }
        if !(self.despawn_z.is_finite() && self.despawn_z > self.player_z) {
            return Err(TuningError::Invalid {
                field: "despawn_z",
                reason: "must lie behind player_z",
            });
        }

        Ok(())
    }

    /// Highest valid lane index
    #[inline]
    pub fn last_lane(&self) -> u8 {
        self.lane_count.saturating_sub(1)
    }

    /// Bullets past this coordinate have left the track
    #[inline]
    pub fn bullet_despawn_z(&self) -> f32 {
        self.spawn_z - self.bullet_despawn_margin
    }
}
