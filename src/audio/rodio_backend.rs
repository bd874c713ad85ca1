//! rodio playback thread.
//!
//! rodio output handles are not `Send`, so the stream is opened on a dedicated thread
//! that owns every sink and drains [`AudioCommand`]s from a channel.

use super::{AudioCommand, ChannelAudio, LoopHandle};
use crate::config::AudioConfig;
use crate::error::{QuizError, Result};
use crate::session::Sound;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Open the default output device on a new thread and return a service feeding it.
pub fn spawn_audio_thread(config: AudioConfig) -> Result<ChannelAudio> {
    let (tx, rx) = mpsc::channel();
    let (ready_tx, ready_rx) = mpsc::sync_channel::<std::result::Result<(), String>>(1);

    thread::Builder::new()
        .name("quizbox-audio".to_string())
        .spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(err) => {
                    let _ = ready_tx.send(Err(err.to_string()));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            let mut player = Player::new(handle, config);
            player.run(rx);
            drop(stream);
        })
        .map_err(|err| QuizError::file_error("failed to spawn audio thread", err))?;

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(ChannelAudio::new(tx)),
        Ok(Err(message)) => Err(QuizError::audio(message)),
        Err(_) => Err(QuizError::audio("audio thread exited during startup")),
    }
}

struct Player {
    handle: OutputStreamHandle,
    config: AudioConfig,
    cache: HashMap<Sound, Vec<u8>>,
    loops: HashMap<LoopHandle, Sink>,
}

impl Player {
    fn new(handle: OutputStreamHandle, config: AudioConfig) -> Self {
        Self {
            handle,
            config,
            cache: HashMap::new(),
            loops: HashMap::new(),
        }
    }

    fn run(&mut self, rx: Receiver<AudioCommand>) {
        while let Ok(command) = rx.recv() {
            if let Err(err) = self.execute(command) {
                log::warn!("audio command {command:?} failed: {err}");
            }
        }
        for (_, sink) in self.loops.drain() {
            sink.stop();
        }
    }

    fn execute(&mut self, command: AudioCommand) -> Result<()> {
        match command {
            AudioCommand::PlayOnce { sound, volume } => {
                let sink = self.new_sink(volume)?;
                sink.append(self.decode(sound)?);
                sink.detach();
            }
            AudioCommand::PlayLoop {
                handle,
                sound,
                volume,
            } => {
                let sink = self.new_sink(volume)?;
                sink.append(self.decode(sound)?.repeat_infinite());
                if let Some(previous) = self.loops.insert(handle, sink) {
                    previous.stop();
                }
            }
            AudioCommand::Pause(handle) => {
                if let Some(sink) = self.loops.get(&handle) {
                    sink.pause();
                }
            }
            AudioCommand::Resume(handle) => {
                if let Some(sink) = self.loops.get(&handle) {
                    sink.play();
                }
            }
            AudioCommand::Stop(handle) => {
                if let Some(sink) = self.loops.remove(&handle) {
                    sink.stop();
                }
            }
        }
        Ok(())
    }

    fn new_sink(&self, volume: f32) -> Result<Sink> {
        let sink = Sink::try_new(&self.handle).map_err(|err| QuizError::audio(err.to_string()))?;
        sink.set_volume(volume);
        Ok(sink)
    }

    fn decode(&mut self, sound: Sound) -> Result<Decoder<Cursor<Vec<u8>>>> {
        if !self.cache.contains_key(&sound) {
            let path = self.config.sound_path(sound);
            let bytes = std::fs::read(&path).map_err(|err| {
                QuizError::file_error(format!("cannot read {}", path.display()), err)
            })?;
            self.cache.insert(sound, bytes);
        }
        let bytes = self.cache.get(&sound).cloned().unwrap_or_default();
        Decoder::new(Cursor::new(bytes)).map_err(|err| QuizError::audio(err.to_string()))
    }
}
