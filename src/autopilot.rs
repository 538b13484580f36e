//! Idle/demo controller
//!
//! Plays the game through the same [`Command`]s a human would issue, one per
//! frame. Used by the headless native run and the browser's attract mode.

use crate::platform::Command;
use crate::sim::{GameState, ObstacleKind, obstacle_speed};

/// Seconds of warning the autopilot wants before an obstacle arrives
pub const REACTION_SECONDS: f32 = 0.6;

/// Pick this frame's command, if any.
///
/// Dodges toward the nearest lane with nothing inside the reaction window,
/// and shoots whenever an enemy sits ahead in the current lane. Enemies inside
/// the window are dodged like walls; a shot might not land in time.
pub fn decide(state: &GameState) -> Option<Command> {
    if !state.is_playing() {
        return None;
    }

    let tuning = &state.tuning;
    let lane = state.player_lane;
    let window = obstacle_speed(state.score, tuning) * REACTION_SECONDS + tuning.player_hit_depth;
    let danger_zone =
        |z: f32| z > tuning.player_z - window && z < tuning.player_z + tuning.player_hit_depth;

    let lane_in_danger = |l: u8| {
        state
            .obstacles
            .iter_active()
            .any(|o| o.lane == l && danger_zone(o.z))
    };

    if lane_in_danger(lane) {
        let safe = (0..tuning.lane_count)
            .filter(|&l| !lane_in_danger(l))
            .min_by_key(|&l| (l.abs_diff(lane), l));
        match safe {
            Some(target) if target < lane => return Some(Command::MoveLeft),
            Some(_) => return Some(Command::MoveRight),
            None => {}
        }
    }

    let enemy_ahead = state.obstacles.iter_active().any(|o| {
        o.lane == lane
            && o.kind == ObstacleKind::Enemy
            && o.z < tuning.player_z - tuning.bullet_offset
    });
    if enemy_ahead {
        return Some(Command::Shoot);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let tuning = Tuning {
            base_spawn_interval: 1.0e6,
            min_spawn_interval: 1.0e6,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 5);
        state.begin_run(5);
        state
    }

    fn place(state: &mut GameState, kind: ObstacleKind, lane: u8, z: f32) {
        let id = state.spawn_obstacle(lane, kind);
        for obstacle in state.obstacles.iter_active_mut() {
            if obstacle.id == id {
                obstacle.z = z;
            }
        }
    }

    #[test]
    fn test_idle_outside_playing() {
        let state = GameState::new(Tuning::default(), 5);
        assert_eq!(decide(&state), None);
    }

    #[test]
    fn test_dodges_wall() {
        let mut state = playing();
        place(&mut state, ObstacleKind::Static, 2, -10.0);
        // Both neighbours are free, left wins the tie
        assert_eq!(decide(&state), Some(Command::MoveLeft));

        place(&mut state, ObstacleKind::Static, 1, -12.0);
        assert_eq!(decide(&state), Some(Command::MoveRight));
    }

    #[test]
    fn test_dodges_close_enemy_instead_of_shooting() {
        let mut state = playing();
        place(&mut state, ObstacleKind::Enemy, 2, -10.0);
        assert_eq!(decide(&state), Some(Command::MoveLeft));

        // Boxed in: nothing to dodge to, so fire
        for lane in [0, 1, 3, 4, 5] {
            place(&mut state, ObstacleKind::Static, lane, -10.0);
        }
        assert_eq!(decide(&state), Some(Command::Shoot));
    }

    #[test]
    fn test_shoots_enemy_in_lane() {
        let mut state = playing();
        place(&mut state, ObstacleKind::Enemy, 2, -90.0);
        assert_eq!(decide(&state), Some(Command::Shoot));
    }

    #[test]
    fn test_ignores_far_walls_and_other_lanes() {
        let mut state = playing();
        place(&mut state, ObstacleKind::Static, 2, -100.0);
        place(&mut state, ObstacleKind::Enemy, 4, -5.0);
        assert_eq!(decide(&state), None);
    }

    #[test]
    fn test_drives_a_session() {
        let mut session = Session::new(Tuning::default(), 2024).unwrap();
        session.start();
        for _ in 0..600 {
            if let Some(command) = decide(session.state()) {
                session.handle(command);
            }
            session.frame(1.0 / 60.0);
            assert!(session.state().player_lane < 6);
        }
    }
}
