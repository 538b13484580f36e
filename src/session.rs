//! Game session: the Menu / Playing / GameOver state machine
//!
//! A session owns the simulation state and the input buffer and is the only
//! thing hosts talk to. Transitions:
//! - Menu -> Playing on [`Command::Start`]
//! - Playing -> GameOver when the player crashes
//! - GameOver -> Playing on [`Command::Restart`]

use crate::platform::Command;
use crate::sim::{GamePhase, GameState, InputBuffer, Snapshot, tick};
use crate::tuning::{Tuning, TuningError};

/// One player's game, from menu through any number of runs
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: InputBuffer,
}

impl Session {
    /// New session sitting in the menu. `seed` drives the first run.
    ///
    /// The tuning is validated here so a bad override is rejected up front
    /// instead of failing mid-run.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let input = InputBuffer::new(&tuning);
        Ok(Self {
            state: GameState::new(tuning, seed),
            input,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Apply a host command. Commands that make no sense in the current
    /// phase are ignored.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.input.move_left(),
            Command::MoveRight => self.input.move_right(),
            Command::Shoot => self.input.request_shoot(),
            Command::Start => {
                self.start();
            }
            Command::Restart => {
                self.restart();
            }
        }
    }

    /// Menu -> Playing. Returns false if not in the menu.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Menu {
            log::debug!("Ignoring start in {:?}", self.state.phase);
            return false;
        }
        let seed = self.state.seed;
        self.begin_run(seed);
        true
    }

    /// GameOver -> Playing with the next seed in sequence. Returns false if
    /// the current run is not over.
    pub fn restart(&mut self) -> bool {
        let seed = next_seed(self.state.seed);
        self.restart_with_seed(seed)
    }

    /// GameOver -> Playing with a host-chosen seed
    pub fn restart_with_seed(&mut self, seed: u64) -> bool {
        if self.state.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.state.phase);
            return false;
        }
        self.begin_run(seed);
        true
    }

    /// Advance one host frame. A no-op outside Playing.
    pub fn frame(&mut self, delta: f32) {
        if !self.state.is_playing() {
            return;
        }
        let input = self.input.take();
        tick(&mut self.state, &input, delta);

        if !self.state.is_playing() {
            self.input.close();
        }
    }

    fn begin_run(&mut self, seed: u64) {
        self.state.begin_run(seed);
        self.input.reset(self.state.tuning.start_lane);
        log::info!("Run started with seed {}", seed);
    }
}

/// Step a run seed forward (PCG multiplier/increment)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;
    use proptest::prelude::*;

    fn quiet_session() -> Session {
        let tuning = Tuning {
            base_spawn_interval: 1.0e6,
            min_spawn_interval: 1.0e6,
            ..Default::default()
        };
        Session::new(tuning, 42).unwrap()
    }

    /// Drive a session into GameOver by parking a wall on the player
    fn crash(session: &mut Session) {
        let lane = session.state.player_lane;
        let id = session.state.spawn_obstacle(lane, ObstacleKind::Static);
        for obstacle in session.state.obstacles.iter_active_mut() {
            if obstacle.id == id {
                obstacle.z = 0.0;
            }
        }
        session.frame(0.0);
    }

    #[test]
    fn test_new_rejects_tuning_that_cannot_spawn() {
        let no_lanes = Tuning {
            lane_count: 0,
            start_lane: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(no_lanes, 1),
            Err(TuningError::Invalid {
                field: "lane_count",
                ..
            })
        ));

        let bad_chance = Tuning {
            enemy_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(bad_chance, 1),
            Err(TuningError::Invalid {
                field: "enemy_chance",
                ..
            })
        ));
    }

    #[test]
    fn test_menu_only_leaves_on_start() {
        let mut session = quiet_session();
        assert_eq!(session.phase(), GamePhase::Menu);

        session.handle(Command::Restart);
        session.handle(Command::MoveRight);
        session.frame(1.0);
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.input().lane_target(), 2);

        session.handle(Command::Start);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_input_reaches_the_tick() {
        let mut session = quiet_session();
        session.start();
        session.handle(Command::MoveRight);
        session.handle(Command::MoveRight);
        session.handle(Command::Shoot);
        session.handle(Command::Shoot);
        session.frame(0.0);
        assert_eq!(session.state().player_lane, 4);
        assert_eq!(session.state().bullets.len(), 1);

        session.frame(0.0);
        assert_eq!(session.state().bullets.len(), 1, "shot consumed once");
    }

    #[test]
    fn test_game_over_only_leaves_on_restart() {
        let mut session = quiet_session();
        session.start();
        crash(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(!session.input().is_accepting());

        session.handle(Command::Start);
        session.handle(Command::MoveLeft);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.handle(Command::Restart);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_ne!(session.state().seed, 42);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut session = quiet_session();
        session.start();
        session.handle(Command::MoveLeft);
        session.handle(Command::Shoot);
        session.frame(0.1);
        session.state.score = 730;
        crash(&mut session);
        assert_eq!(session.score(), 730);

        assert!(session.restart_with_seed(9));
        assert_eq!(session.score(), 0);
        assert!(session.state().obstacles.is_empty());
        assert!(session.state().bullets.is_empty());
        assert_eq!(session.input().lane_target(), 2);
        assert_eq!(session.state().player_lane, 2);
    }

    #[test]
    fn test_start_and_restart_refused_while_playing() {
        let mut session = quiet_session();
        assert!(session.start());
        assert!(!session.start());
        assert!(!session.restart());
    }

    #[test]
    fn test_seeded_sessions_replay() {
        let mut a = Session::new(Tuning::default(), 77).unwrap();
        let mut b = Session::new(Tuning::default(), 77).unwrap();
        a.start();
        b.start();
        for _ in 0..900 {
            a.frame(1.0 / 60.0);
            b.frame(1.0 / 60.0);
            assert_eq!((a.score(), a.phase()), (b.score(), b.phase()));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    proptest! {
        #[test]
        fn prop_entering_playing_always_resets(seed in any::<u64>(), frames in 1usize..400) {
            let mut session = Session::new(Tuning::default(), seed).unwrap();
            session.start();
            for i in 0..frames {
                if i % 7 == 0 {
                    session.handle(Command::Shoot);
                }
                session.frame(1.0 / 30.0);
            }
            if session.phase() == GamePhase::Playing {
                crash(&mut session);
            }
            prop_assert_eq!(session.phase(), GamePhase::GameOver);
            session.handle(Command::Restart);
            prop_assert_eq!(session.phase(), GamePhase::Playing);
            prop_assert_eq!(session.score(), 0);
            prop_assert!(session.state().obstacles.is_empty());
            prop_assert!(session.state().bullets.is_empty());
        }
    }
}
