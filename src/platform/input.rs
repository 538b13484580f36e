//! Keyboard and touch mapping

use crate::sim::GamePhase;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Shoot,
    /// Leave the menu
    Start,
    /// Leave the game-over screen
    Restart,
}

/// Map a `KeyboardEvent.key` value to a command.
///
/// Enter doubles as the start and reboot button, so its meaning depends on
/// the phase.
pub fn command_for_key(key: &str, phase: GamePhase) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        " " | "ArrowUp" | "w" | "W" => Some(Command::Shoot),
        "Enter" => match phase {
            GamePhase::Menu => Some(Command::Start),
            GamePhase::GameOver => Some(Command::Restart),
            GamePhase::Playing => None,
        },
        _ => None,
    }
}

/// Map a tap to a command from its horizontal position.
///
/// `x_fraction` is the tap position across the canvas in [0, 1]. The outer
/// thirds steer, the middle third fires.
pub fn command_for_tap(x_fraction: f32) -> Option<Command> {
    if !x_fraction.is_finite() {
        return None;
    }
    if x_fraction < 1.0 / 3.0 {
        Some(Command::MoveLeft)
    } else if x_fraction > 2.0 / 3.0 {
        Some(Command::MoveRight)
    } else {
        Some(Command::Shoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        for key in ["ArrowLeft", "a", "A"] {
            assert_eq!(command_for_key(key, GamePhase::Playing), Some(Command::MoveLeft));
        }
        for key in ["ArrowRight", "d", "D"] {
            assert_eq!(command_for_key(key, GamePhase::Playing), Some(Command::MoveRight));
        }
        for key in [" ", "ArrowUp", "w", "W"] {
            assert_eq!(command_for_key(key, GamePhase::Playing), Some(Command::Shoot));
        }
        assert_eq!(command_for_key("q", GamePhase::Playing), None);
    }

    #[test]
    fn test_enter_depends_on_phase() {
        assert_eq!(command_for_key("Enter", GamePhase::Menu), Some(Command::Start));
        assert_eq!(command_for_key("Enter", GamePhase::GameOver), Some(Command::Restart));
        assert_eq!(command_for_key("Enter", GamePhase::Playing), None);
    }

    #[test]
    fn test_tap_zones() {
        assert_eq!(command_for_tap(0.1), Some(Command::MoveLeft));
        assert_eq!(command_for_tap(0.5), Some(Command::Shoot));
        assert_eq!(command_for_tap(0.9), Some(Command::MoveRight));
        assert_eq!(command_for_tap(f32::NAN), None);
    }
}
