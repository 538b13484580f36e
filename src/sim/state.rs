//! Game state and core simulation types
//!
//! Everything the simulation is authoritative for lives here. Presentation
//! reads it through [`super::Snapshot`] and never mutates it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::store::{Entity, EntityStore};
use crate::tuning::Tuning;

/// Stable identity of an obstacle or bullet
pub type EntityId = u32;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a collision, waiting for restart
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Indestructible wall, must be dodged
    Static,
    /// Shootable drone, worth bonus score when destroyed
    Enemy,
}

impl ObstacleKind {
    /// Whether bullets can destroy this obstacle
    #[inline]
    pub fn is_shootable(self) -> bool {
        self == ObstacleKind::Enemy
    }
}

/// An obstacle travelling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    pub kind: ObstacleKind,
    pub lane: u8,
    pub z: f32,
    pub active: bool,
}

impl Entity for Obstacle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A player-fired projectile travelling toward the spawn region
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: EntityId,
    pub lane: u8,
    pub z: f32,
    /// Units per second; positive values move toward the spawn region
    pub speed: f32,
    pub active: bool,
}

impl Entity for Bullet {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Something that happened during a tick, for effects and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: ObstacleKind,
        lane: u8,
    },
    Fired {
        id: EntityId,
        lane: u8,
    },
    /// Obstacle passed the player
    Survived { id: EntityId },
    /// Bullet destroyed an enemy
    Destroyed { obstacle: EntityId, bullet: EntityId },
    /// Obstacle hit the player, run is over
    Crashed { obstacle: EntityId },
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance and geometry, fixed for the lifetime of the state
    pub tuning: Tuning,
    /// Seed of the current run
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score of the current run
    pub score: u64,
    /// Simulated seconds since the run started. Kept in f64 so a long run
    /// still accumulates single-frame deltas.
    pub elapsed: f64,
    /// `elapsed` at the most recent spawn
    pub last_spawn: f64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Authoritative player lane
    pub player_lane: u8,
    /// Obstacles in creation order
    pub obstacles: EntityStore<Obstacle>,
    /// Bullets in creation order
    pub bullets: EntityStore<Bullet>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
    /// Next entity ID (shared by obstacles and bullets)
    next_id: EntityId,
}

impl GameState {
    /// Create a state sitting in the menu.
    ///
    /// `tuning` must already be validated; [`crate::Session::new`] does that
    /// for hosts.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning");
        let player_lane = tuning.start_lane;
        Self {
            tuning,
            seed,
            phase: GamePhase::Menu,
            score: 0,
            elapsed: 0.0,
            last_spawn: 0.0,
            time_ticks: 0,
            player_lane,
            obstacles: EntityStore::new(),
            bullets: EntityStore::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Enter Playing with a fresh run: score, entities, clock and RNG reset
    pub fn begin_run(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.elapsed = 0.0;
        self.last_spawn = 0.0;
        self.time_ticks = 0;
        self.player_lane = self.tuning.start_lane;
        self.obstacles.clear();
        self.bullets.clear();
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an obstacle at the spawn coordinate
    pub fn spawn_obstacle(&mut self, lane: u8, kind: ObstacleKind) -> EntityId {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            lane,
            z: self.tuning.spawn_z,
            active: true,
        });
        self.events.push(GameEvent::Spawned { id, kind, lane });
        id
    }

    /// Fire a bullet from the player's current lane
    pub fn fire_bullet(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let lane = self.player_lane;
        self.bullets.push(Bullet {
            id,
            lane,
            z: self.tuning.player_z - self.tuning.bullet_offset,
            speed: self.tuning.bullet_speed,
            active: true,
        });
        self.events.push(GameEvent::Fired { id, lane });
        id
    }

    /// Whether the simulation should advance
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_menu() {
        let state = GameState::new(Tuning::default(), 7);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.player_lane, 2);
        assert!(state.obstacles.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique_across_kinds() {
        let mut state = GameState::new(Tuning::default(), 7);
        state.begin_run(7);
        let a = state.spawn_obstacle(0, ObstacleKind::Enemy);
        let b = state.fire_bullet();
        let c = state.spawn_obstacle(1, ObstacleKind::Static);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_fire_bullet_uses_player_lane_and_offset() {
        let mut state = GameState::new(Tuning::default(), 7);
        state.begin_run(7);
        state.player_lane = 4;
        state.fire_bullet();
        let bullet = state.bullets.iter().next().unwrap();
        assert_eq!(bullet.lane, 4);
        assert_eq!(bullet.z, -2.0);
        assert_eq!(bullet.speed, 80.0);
    }

    #[test]
    fn test_begin_run_resets_everything() {
        let mut state = GameState::new(Tuning::default(), 7);
        state.begin_run(7);
        state.score = 900;
        state.elapsed = 12.0;
        state.player_lane = 5;
        state.spawn_obstacle(3, ObstacleKind::Enemy);
        state.fire_bullet();
        state.phase = GamePhase::GameOver;

        state.begin_run(8);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player_lane, 2);
        assert_eq!(state.seed, 8);
        assert!(state.obstacles.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_obstacle_kind_shootable() {
        assert!(ObstacleKind::Enemy.is_shootable());
        assert!(!ObstacleKind::Static.is_shootable());
    }
}
