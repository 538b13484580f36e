//! Read-only per-frame view of the simulation
//!
//! The presentation layer gets an owned copy each frame, so it can never alias
//! the simulation's collections.

use serde::{Deserialize, Serialize};

use super::state::{EntityId, GameEvent, GamePhase, GameState, ObstacleKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: EntityId,
    pub lane: u8,
    pub z: f32,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub lane: u8,
    pub z: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub player_lane: u8,
    pub obstacles: Vec<ObstacleView>,
    pub bullets: Vec<BulletView>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Capture the active entities of `state`
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            player_lane: state.player_lane,
            obstacles: state
                .obstacles
                .iter_active()
                .map(|o| ObstacleView {
                    id: o.id,
                    lane: o.lane,
                    z: o.z,
                    kind: o.kind,
                })
                .collect(),
            bullets: state
                .bullets
                .iter_active()
                .map(|b| BulletView {
                    id: b.id,
                    lane: b.lane,
                    z: b.z,
                })
                .collect(),
            events: state.events.clone(),
        }
    }

    /// JSON form handed to the browser renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_copies_active_entities() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.begin_run(3);
        let keep = state.spawn_obstacle(1, ObstacleKind::Enemy);
        let gone = state.spawn_obstacle(2, ObstacleKind::Static);
        state.obstacles.deactivate(gone);
        state.fire_bullet();

        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.player_lane, 2);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.obstacles[0].id, keep);
        assert_eq!(snapshot.bullets.len(), 1);
        assert_eq!(snapshot.bullets[0].z, -2.0);
    }

    #[test]
    fn test_json_shape() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.begin_run(3);
        state.spawn_obstacle(4, ObstacleKind::Static);
        let json = Snapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["obstacles"][0]["kind"], "Static");
        assert_eq!(value["obstacles"][0]["lane"], 4);
        assert_eq!(value["events"][0]["type"], "Spawned");
    }
}
