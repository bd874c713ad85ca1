//! Side-effect requests produced by state transitions

use super::state::TimerId;
use std::fmt;
use std::time::Duration;

/// Sounds the game can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Looping background music while the quiz screen is up.
    Bgm,
    /// Cursor moved to another choice.
    Select,
    Correct,
    Incorrect,
}

impl Sound {
    pub const ALL: [Sound; 4] = [Sound::Bgm, Sound::Select, Sound::Correct, Sound::Incorrect];

    /// Asset file name under the configured sound directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Bgm => "play.mp3",
            Sound::Select => "select.wav",
            Sound::Correct => "maru.wav",
            Sound::Incorrect => "batu.wav",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sound::Bgm => "bgm",
            Sound::Select => "select",
            Sound::Correct => "correct",
            Sound::Incorrect => "incorrect",
        };
        f.write_str(name)
    }
}

/// Effects to be executed after a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget one-shot sound
    PlaySound(Sound),

    /// Begin looping background music
    StartMusic,

    PauseMusic,

    ResumeMusic,

    StopMusic,

    /// Deliver `Event::TimerFired { id }` after `delay`
    ScheduleTimer { id: TimerId, delay: Duration },

    /// Drop a previously scheduled callback
    CancelTimer { id: TimerId },
}
