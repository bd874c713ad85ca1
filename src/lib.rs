//! # quizbox - Terminal Quiz Game
//!
//! A ten-question multiple-choice quiz played with the keyboard or a gamepad.
//!
//! ## Features
//!
//! - **Elimination Play**: a wrong answer greys out that choice and the player tries again
//! - **Result Flash**: ○ / × overlay for one second after every answer
//! - **Pause**: freezes gameplay input and the background music
//! - **Reset Combo**: five presses of the reset key return to the title from anywhere
//! - **Optional Backends**: rodio audio and gilrs gamepads behind cargo features
//!
//! ## Architecture
//!
//! - [`session`] - Pure state machine holding all game rules
//! - [`questions`] - Question data and startup validation
//! - [`input`] - Keyboard and gamepad routing into gameplay actions
//! - [`audio`] / [`timer`] - Effect backends driven by the application loop
//! - [`render`] - View model and ratatui terminal renderer
//! - [`app`] - Message loop tying it all together
//! - [`config`] / [`error`] - Settings and the shared error type

// Core modules
pub mod error;
pub mod questions;
pub mod session;

// Subsystems
pub mod audio;
pub mod config;
pub mod input;
pub mod render;
pub mod timer;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{QuizError, Result};

pub use app::Application;
pub use config::QuizConfig;
pub use questions::QuestionBank;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
