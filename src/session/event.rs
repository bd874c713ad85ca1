//! Events delivered to the session state machine

use super::state::TimerId;

/// Abstract player action produced by the input router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Confirm,
    Up,
    Down,
    PauseToggle,
    ResetCombo,
}

impl Action {
    /// Actions that are processed even while the game is paused.
    pub fn bypasses_pause(self) -> bool {
        matches!(self, Action::PauseToggle | Action::ResetCombo)
    }
}

/// Everything that can re-enter the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(Action),
    /// A scheduled result callback elapsed.
    TimerFired { id: TimerId },
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        Event::Input(action)
    }
}
