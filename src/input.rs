//! Input subsystem: keyboard polling and gamepad sampling.
//!
//! Both sources reduce to the same five gameplay actions so the session never has to
//! know which device a press came from.

pub mod gamepad;
pub mod raw;
pub mod service;

pub use gamepad::{GamepadRouter, GamepadSnapshot, GamepadSource, NoGamepad};
pub use service::{InputAction, InputService, KeyRouter};
