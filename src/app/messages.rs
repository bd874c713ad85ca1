//! Messages delivered to the application loop.

use crate::input::InputAction;
use crate::session::TimerId;

/// Everything the loop reacts to arrives through one channel, so input and timer
/// firings are processed strictly one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Input(InputAction),
    TimerFired(TimerId),
}

impl From<InputAction> for AppMessage {
    fn from(action: InputAction) -> Self {
        AppMessage::Input(action)
    }
}
