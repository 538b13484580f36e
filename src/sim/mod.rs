//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (creation order, by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{bullet_hits, hits_player, same_lane_within};
pub use input::{InputBuffer, TickInput};
pub use snapshot::{BulletView, ObstacleView, Snapshot};
pub use spawn::{difficulty, obstacle_speed, roll_obstacle, spawn_interval};
pub use state::{Bullet, EntityId, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
pub use store::{Entity, EntityStore};
pub use tick::tick;
