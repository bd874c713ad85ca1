//! Polled gamepad input.
//!
//! Controllers are sampled at a fixed cadence. Each sample is a [`GamepadSnapshot`] of
//! the buttons the game uses; [`GamepadRouter`] turns rising edges into actions so a
//! held button fires once rather than on every poll.

use crate::session::Action;

/// Pressed state of the buttons the game reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadSnapshot {
    /// Primary face button (A on Xbox layouts, Cross on PlayStation).
    pub south: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub start: bool,
}

impl GamepadSnapshot {
    /// Combine several controllers; a button counts as pressed if any pad holds it.
    pub fn merge(self, other: GamepadSnapshot) -> GamepadSnapshot {
        GamepadSnapshot {
            south: self.south || other.south,
            dpad_up: self.dpad_up || other.dpad_up,
            dpad_down: self.dpad_down || other.dpad_down,
            start: self.start || other.start,
        }
    }
}

/// Anything that can be sampled for a snapshot.
pub trait GamepadSource {
    /// Current button state, or `None` when no controller is connected.
    fn poll(&mut self) -> Option<GamepadSnapshot>;
}

/// Edge detector mapping snapshots to at most one action each.
#[derive(Debug, Default)]
pub struct GamepadRouter {
    previous: GamepadSnapshot,
}

impl GamepadRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a snapshot. A missing controller counts as all buttons released.
    pub fn route(&mut self, snapshot: Option<GamepadSnapshot>) -> Option<Action> {
        let current = snapshot.unwrap_or_default();
        let previous = std::mem::replace(&mut self.previous, current);
        let pressed = |now: bool, before: bool| now && !before;

        if pressed(current.start, previous.start) {
            Some(Action::PauseToggle)
        } else if pressed(current.south, previous.south) {
            Some(Action::Confirm)
        } else if pressed(current.dpad_up, previous.dpad_up) {
            Some(Action::Up)
        } else if pressed(current.dpad_down, previous.dpad_down) {
            Some(Action::Down)
        } else {
            None
        }
    }
}

/// Source used when no controller backend is available.
#[derive(Debug, Default)]
pub struct NoGamepad;

impl GamepadSource for NoGamepad {
    fn poll(&mut self) -> Option<GamepadSnapshot> {
        None
    }
}

#[cfg(feature = "gamepad")]
pub use gilrs_source::GilrsSource;

#[cfg(feature = "gamepad")]
mod gilrs_source {
    use super::{GamepadSnapshot, GamepadSource};
    use crate::error::{QuizError, Result};
    use gilrs::{Button, Gilrs};

    /// Controllers read through gilrs. Not `Send`; create it on the polling thread.
    pub struct GilrsSource {
        gilrs: Gilrs,
    }

    impl GilrsSource {
        pub fn new() -> Result<Self> {
            let gilrs = Gilrs::new().map_err(|err| QuizError::gamepad(err.to_string()))?;
            Ok(Self { gilrs })
        }
    }

    impl GamepadSource for GilrsSource {
        fn poll(&mut self) -> Option<GamepadSnapshot> {
            // Drain queued events so the cached button state is current.
            while self.gilrs.next_event().is_some() {}

            self.gilrs
                .gamepads()
                .filter(|(_, pad)| pad.is_connected())
                .map(|(_, pad)| GamepadSnapshot {
                    south: pad.is_pressed(Button::South),
                    dpad_up: pad.is_pressed(Button::DPadUp),
                    dpad_down: pad.is_pressed(Button::DPadDown),
                    start: pad.is_pressed(Button::Start),
                })
                .reduce(GamepadSnapshot::merge)
        }
    }
}
