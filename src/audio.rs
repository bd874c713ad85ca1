//! Audio playback service.
//!
//! The game never waits on audio: every call is a fire-and-forget request. Looping
//! music is addressed through a [`LoopHandle`] allocated on the caller's side so
//! that requests can be queued to a backend thread without a round trip.

#[cfg(feature = "audio")]
pub mod rodio_backend;

use crate::config::AudioConfig;
use crate::session::Sound;
use std::fmt;
use std::sync::mpsc::Sender;

/// Handle to a looping sound started with [`AudioService::play_loop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle(pub u64);

impl fmt::Display for LoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loop#{}", self.0)
    }
}

/// Commands understood by audio backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    PlayOnce {
        sound: Sound,
        volume: f32,
    },
    PlayLoop {
        handle: LoopHandle,
        sound: Sound,
        volume: f32,
    },
    Pause(LoopHandle),
    Resume(LoopHandle),
    Stop(LoopHandle),
}

/// Fire-and-forget audio interface used by the application loop.
pub trait AudioService: Send {
    fn play_once(&mut self, sound: Sound, volume: f32);

    fn play_loop(&mut self, sound: Sound, volume: f32) -> LoopHandle;

    fn pause(&mut self, handle: LoopHandle);

    fn resume(&mut self, handle: LoopHandle);

    fn stop(&mut self, handle: LoopHandle);
}

#[derive(Debug, Default)]
struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    fn allocate(&mut self) -> LoopHandle {
        self.next += 1;
        LoopHandle(self.next)
    }
}

/// Backend that plays nothing and logs requests at debug level.
#[derive(Debug, Default)]
pub struct NullAudio {
    handles: HandleAllocator,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioService for NullAudio {
    fn play_once(&mut self, sound: Sound, volume: f32) {
        log::debug!("audio (muted): play {sound} at {volume:.2}");
    }

    fn play_loop(&mut self, sound: Sound, volume: f32) -> LoopHandle {
        let handle = self.handles.allocate();
        log::debug!("audio (muted): loop {sound} at {volume:.2} as {handle}");
        handle
    }

    fn pause(&mut self, handle: LoopHandle) {
        log::debug!("audio (muted): pause {handle}");
    }

    fn resume(&mut self, handle: LoopHandle) {
        log::debug!("audio (muted): resume {handle}");
    }

    fn stop(&mut self, handle: LoopHandle) {
        log::debug!("audio (muted): stop {handle}");
    }
}

/// Forwards commands to a backend thread over a channel.
#[derive(Debug)]
pub struct ChannelAudio {
    tx: Sender<AudioCommand>,
    handles: HandleAllocator,
}

impl ChannelAudio {
    pub fn new(tx: Sender<AudioCommand>) -> Self {
        Self {
            tx,
            handles: HandleAllocator::default(),
        }
    }

    fn send(&self, command: AudioCommand) {
        if self.tx.send(command).is_err() {
            log::warn!("audio backend is gone, dropping {command:?}");
        }
    }
}

impl AudioService for ChannelAudio {
    fn play_once(&mut self, sound: Sound, volume: f32) {
        self.send(AudioCommand::PlayOnce { sound, volume });
    }

    fn play_loop(&mut self, sound: Sound, volume: f32) -> LoopHandle {
        let handle = self.handles.allocate();
        self.send(AudioCommand::PlayLoop {
            handle,
            sound,
            volume,
        });
        handle
    }

    fn pause(&mut self, handle: LoopHandle) {
        self.send(AudioCommand::Pause(handle));
    }

    fn resume(&mut self, handle: LoopHandle) {
        self.send(AudioCommand::Resume(handle));
    }

    fn stop(&mut self, handle: LoopHandle) {
        self.send(AudioCommand::Stop(handle));
    }
}

/// Pick the best available backend; falls back to [`NullAudio`] instead of failing.
pub fn build_audio_service(config: &AudioConfig, muted: bool) -> Box<dyn AudioService> {
    if muted || !config.enabled {
        log::info!("audio disabled");
        return Box::new(NullAudio::new());
    }

    #[cfg(feature = "audio")]
    {
        match rodio_backend::spawn_audio_thread(config.clone()) {
            Ok(service) => return Box::new(service),
            Err(err) => log::warn!("audio output unavailable, continuing muted: {err}"),
        }
    }

    #[cfg(not(feature = "audio"))]
    {
        log::info!("built without the `audio` feature, sounds are muted");
    }

    Box::new(NullAudio::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn null_audio_allocates_distinct_handles() {
        let mut audio = NullAudio::new();
        let first = audio.play_loop(Sound::Bgm, 0.25);
        let second = audio.play_loop(Sound::Bgm, 0.25);
        assert_ne!(first, second);
    }

    #[test]
    fn channel_audio_forwards_commands_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut audio = ChannelAudio::new(tx);

        audio.play_once(Sound::Correct, 0.6);
        let handle = audio.play_loop(Sound::Bgm, 0.25);
        audio.pause(handle);
        audio.resume(handle);
        audio.stop(handle);

        let received: Vec<AudioCommand> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                AudioCommand::PlayOnce {
                    sound: Sound::Correct,
                    volume: 0.6
                },
                AudioCommand::PlayLoop {
                    handle,
                    sound: Sound::Bgm,
                    volume: 0.25
                },
                AudioCommand::Pause(handle),
                AudioCommand::Resume(handle),
                AudioCommand::Stop(handle),
            ]
        );
    }

    #[test]
    fn channel_audio_survives_dropped_backend() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut audio = ChannelAudio::new(tx);
        audio.play_once(Sound::Select, 0.5);
        let handle = audio.play_loop(Sound::Bgm, 0.25);
        audio.stop(handle);
    }

    #[test]
    fn muted_config_yields_null_backend() {
        let config = AudioConfig::default();
        let mut audio = build_audio_service(&config, true);
        let handle = audio.play_loop(Sound::Bgm, 0.25);
        audio.stop(handle);
    }
}
