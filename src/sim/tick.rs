//! Fixed timestep frame driver
//!
//! One call advances the session by exactly one frame. Pause, confirm and
//! restart act on the frame they are first pressed; everything else is
//! read as held.

use serde::{Deserialize, Serialize};

use super::session::GameSession;

/// Player intents held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub accelerate: bool,
    pub fire: bool,
    /// Toggle pause
    pub pause: bool,
    /// Start a run from the menu
    pub confirm: bool,
    /// Start a new run after game over
    pub restart: bool,
}

impl InputState {
    /// Intents held now that were not held in `previous`
    pub fn pressed_since(&self, previous: &InputState) -> InputState {
        InputState {
            rotate_left: self.rotate_left && !previous.rotate_left,
            rotate_right: self.rotate_right && !previous.rotate_right,
            accelerate: self.accelerate && !previous.accelerate,
            fire: self.fire && !previous.fire,
            pause: self.pause && !previous.pause,
            confirm: self.confirm && !previous.confirm,
            restart: self.restart && !previous.restart,
        }
    }
}

/// Advance the session by one frame.
///
/// A frame that changes phase does nothing else. Outside Playing the
/// simulation is frozen.
pub fn tick(session: &mut GameSession, input: &InputState) {
    let pressed = input.pressed_since(session.previous_input());
    session.remember_input(*input);

    if let Some(change) = session.phase().on_input(&pressed) {
        session.apply_phase_change(change);
    } else if session.phase().is_playing() {
        session.play_frame(input);
    }

    session.check_invariants();
}
