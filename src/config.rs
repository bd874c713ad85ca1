//! Runtime configuration loaded from TOML.
//!
//! Lookup order: an explicit `--config` path (must exist), then
//! `<config dir>/quizbox/config.toml` when present, then built-in defaults. Question
//! content is not configurable; only timing, rules and audio settings are.

use crate::error::{QuizError, Result};
use crate::session::{SessionContext, Sound};
use crate::questions::QuestionBank;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "quizbox";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    /// Write logs here instead of stderr (stderr is hidden by the alternate screen).
    pub log_file: Option<PathBuf>,
    pub timing: TimingConfig,
    pub rules: RulesConfig,
    pub audio: AudioConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// How long the ○/× overlay stays up after an answer.
    pub result_delay_ms: u64,
    pub gamepad_poll_ms: u64,
    /// Keyboard poll timeout; bounds how quickly input threads notice shutdown.
    pub input_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            result_delay_ms: 1000,
            gamepad_poll_ms: 100,
            input_poll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub reset_combo_threshold: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reset_combo_threshold: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub enabled: bool,
    pub assets_dir: PathBuf,
    pub music_volume: f32,
    pub select_volume: f32,
    pub answer_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            assets_dir: PathBuf::from("assets/sound"),
            music_volume: 0.25,
            select_volume: 0.5,
            answer_volume: 0.6,
        }
    }
}

impl AudioConfig {
    pub fn volume(&self, sound: Sound) -> f32 {
        match sound {
            Sound::Bgm => self.music_volume,
            Sound::Select => self.select_volume,
            Sound::Correct | Sound::Incorrect => self.answer_volume,
        }
    }

    pub fn sound_path(&self, sound: Sound) -> PathBuf {
        self.assets_dir.join(sound.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub gamepad: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { gamepad: true }
    }
}

impl QuizConfig {
    /// Load configuration following the lookup order described in the module docs.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(QuizError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `<config dir>/quizbox/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            QuizError::file_error(format!("cannot read config {}", path.display()), err)
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timing.result_delay_ms == 0 {
            return Err(QuizError::config("timing.result_delay_ms must be positive"));
        }
        if self.timing.gamepad_poll_ms == 0 || self.timing.input_poll_ms == 0 {
            return Err(QuizError::config("poll intervals must be positive"));
        }
        if self.rules.reset_combo_threshold == 0 {
            return Err(QuizError::config("rules.reset_combo_threshold must be at least 1"));
        }
        let volumes = [
            ("audio.music_volume", self.audio.music_volume),
            ("audio.select_volume", self.audio.select_volume),
            ("audio.answer_volume", self.audio.answer_volume),
        ];
        for (name, volume) in volumes {
            if !(0.0..=1.0).contains(&volume) {
                return Err(QuizError::config(format!(
                    "{name} must be between 0.0 and 1.0, got {volume}"
                )));
            }
        }
        Ok(())
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.timing.result_delay_ms)
    }

    pub fn gamepad_poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.gamepad_poll_ms)
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.input_poll_ms)
    }

    /// Build the state machine context from these settings.
    pub fn session_context(&self, questions: QuestionBank) -> SessionContext {
        SessionContext::new(questions)
            .with_result_delay(self.result_delay())
            .with_reset_combo_threshold(self.rules.reset_combo_threshold)
    }
}
