//! Error types and handling infrastructure for quizbox.
//!
//! Gameplay itself never fails: events that make no sense for the current state are
//! dropped by the session state machine. The errors here cover the surrounding
//! infrastructure (configuration, terminal, audio and controller backends) plus the
//! fail-fast validation of question data at startup.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quizbox operations.
#[derive(Error, Debug)]
pub enum QuizError {
    /// File system related errors (config file unreadable, log file not creatable, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration could not be parsed or holds out-of-range values
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Question data is malformed (rejected at startup)
    #[error("Invalid question #{index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Audio backend could not be opened or a sound could not be decoded
    #[error("Audio error: {message}")]
    AudioError { message: String },

    /// Gamepad backend could not be opened
    #[error("Gamepad error: {message}")]
    GamepadError { message: String },

}

/// Standard Result type for quizbox operations.
pub type Result<T> = std::result::Result<T, QuizError>;

impl QuizError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidQuestion error for the question at `index`
    pub fn invalid_question(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidQuestion {
            index,
            reason: reason.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create an AudioError with a descriptive message
    pub fn audio(message: impl Into<String>) -> Self {
        Self::AudioError {
            message: message.into(),
        }
    }

    /// Create a GamepadError with a descriptive message
    pub fn gamepad(message: impl Into<String>) -> Self {
        Self::GamepadError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: err.to_string(),
        }
    }
}
