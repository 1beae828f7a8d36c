//! Game phases and the input-driven transitions between them

use serde::{Deserialize, Serialize};

use super::tick::InputState;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// A transition requested by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub to: GamePhase,
    /// Start a fresh run before entering `to`
    pub reset: bool,
}

impl GamePhase {
    /// Transition for the inputs pressed this frame, if any.
    ///
    /// `pressed` carries only newly pressed intents. Inputs that do not
    /// match the current phase are ignored. Playing -> GameOver is not
    /// input driven; the session enters it on a fatal collision.
    pub fn on_input(self, pressed: &InputState) -> Option<PhaseChange> {
        match self {
            GamePhase::Menu if pressed.confirm => Some(PhaseChange {
                to: GamePhase::Playing,
                reset: true,
            }),
            GamePhase::Playing if pressed.pause => Some(PhaseChange {
                to: GamePhase::Paused,
                reset: false,
            }),
            GamePhase::Paused if pressed.pause => Some(PhaseChange {
                to: GamePhase::Playing,
                reset: false,
            }),
            GamePhase::GameOver if pressed.restart => Some(PhaseChange {
                to: GamePhase::Playing,
                reset: true,
            }),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(f: impl FnOnce(&mut InputState)) -> InputState {
        let mut input = InputState::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_menu_confirm_starts_run() {
        let change = GamePhase::Menu.on_input(&press(|i| i.confirm = true));
        assert_eq!(
            change,
            Some(PhaseChange {
                to: GamePhase::Playing,
                reset: true
            })
        );
    }

    #[test]
    fn test_pause_toggles() {
        let pause = press(|i| i.pause = true);
        assert_eq!(GamePhase::Playing.on_input(&pause).map(|c| c.to), Some(GamePhase::Paused));
        assert_eq!(GamePhase::Paused.on_input(&pause).map(|c| c.to), Some(GamePhase::Playing));
        assert_eq!(GamePhase::Paused.on_input(&pause).map(|c| c.reset), Some(false));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let restart = press(|i| i.restart = true);
        assert_eq!(
            GamePhase::GameOver.on_input(&restart),
            Some(PhaseChange {
                to: GamePhase::Playing,
                reset: true
            })
        );
        assert_eq!(GamePhase::Playing.on_input(&restart), None);
        assert_eq!(GamePhase::Menu.on_input(&restart), None);
    }

    #[test]
    fn test_unrelated_inputs_are_ignored() {
        let noisy = press(|i| {
            i.fire = true;
            i.accelerate = true;
            i.confirm = true;
        });
        assert_eq!(GamePhase::Playing.on_input(&noisy), None);
        assert_eq!(GamePhase::Paused.on_input(&noisy), None);
        assert_eq!(GamePhase::GameOver.on_input(&noisy), None);
        assert_eq!(GamePhase::Menu.on_input(&press(|i| i.pause = true)), None);
    }
}
