//! Quiz session state machine
//!
//! Owns the game rules: screen flow, question progression, choice elimination, scoring,
//! pause handling and the reset combo. Transitions are pure; timing and audio are
//! requested through [`Effect`]s and executed by the application loop.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Sound};
pub use event::{Action, Event};
pub use state::{
    ChoiceSet, PendingTimer, ResultFlash, Screen, SessionContext, SessionState, TimerId,
    TimerKind,
};
pub use transition::{transition, IgnoreReason, TransitionResult};
