//! Application orchestration layer
//!
//! The loop owns the session state, feeds every [`AppMessage`] through the pure
//! transition function and executes the resulting effects against the audio and
//! timer services before redrawing.

pub mod messages;
pub mod runtime;

use crate::audio::{AudioService, LoopHandle};
use crate::config::AudioConfig;
use crate::error::Result;
use crate::input::InputAction;
use crate::render::{QuizView, UIRenderer};
use crate::session::{transition, Effect, Event, SessionContext, SessionState, Sound};
use crate::timer::TimerService;
use messages::AppMessage;
use tokio::sync::mpsc::UnboundedReceiver;

/// Side-effect backends the loop drives.
pub struct Services {
    pub ui_renderer: Box<dyn UIRenderer>,
    pub audio: Box<dyn AudioService>,
    pub timers: Box<dyn TimerService>,
}

/// Application orchestrator
pub struct Application {
    state: SessionState,
    ctx: SessionContext,
    services: Services,
    volumes: AudioConfig,
    /// Background music currently owned by the quiz screen.
    music: Option<LoopHandle>,
    rx: UnboundedReceiver<AppMessage>,
}

impl Application {
    pub fn new(
        ctx: SessionContext,
        services: Services,
        volumes: AudioConfig,
        rx: UnboundedReceiver<AppMessage>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            ctx,
            services,
            volumes,
            music: None,
            rx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until the player quits or every sender is gone.
    pub async fn run(&mut self) -> Result<()> {
        self.services.ui_renderer.initialize()?;

        let outcome = self.event_loop().await;

        if let Some(handle) = self.music.take() {
            self.services.audio.stop(handle);
        }
        let cleanup = self.services.ui_renderer.cleanup();
        outcome.and(cleanup)
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.render()?;
        while self.step().await? {}
        Ok(())
    }

    /// Wait for one message, handle it and redraw. Returns `false` when the loop should
    /// stop.
    pub async fn step(&mut self) -> Result<bool> {
        let Some(message) = self.rx.recv().await else {
            log::info!("all input sources closed, shutting down");
            return Ok(false);
        };

        if !self.process_message(message) {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Apply a single message. Returns `false` on quit.
    pub fn process_message(&mut self, message: AppMessage) -> bool {
        match message {
            AppMessage::Input(InputAction::Quit) => {
                log::info!("quit requested");
                return false;
            }
            AppMessage::Input(InputAction::Session(action)) => self.dispatch(Event::Input(action)),
            AppMessage::Input(InputAction::Resize { width, height }) => {
                log::debug!("terminal resized to {width}x{height}");
            }
            AppMessage::Input(InputAction::NoAction) => {}
            AppMessage::TimerFired(id) => {
                self.services.timers.complete(id);
                self.dispatch(Event::TimerFired { id });
            }
        }
        true
    }

    fn dispatch(&mut self, event: Event) {
        let result = transition(&self.state, &self.ctx, event);
        if let Some(reason) = result.ignored {
            log::debug!("ignored {event:?}: {reason:?}");
        }
        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        log::trace!("effect {effect:?}");
        let audio = &mut self.services.audio;
        match effect {
            Effect::PlaySound(sound) => audio.play_once(sound, self.volumes.volume(sound)),
            Effect::StartMusic => {
                if let Some(previous) = self.music.take() {
                    audio.stop(previous);
                }
                self.music = Some(audio.play_loop(Sound::Bgm, self.volumes.volume(Sound::Bgm)));
            }
            Effect::PauseMusic => {
                if let Some(handle) = self.music {
                    audio.pause(handle);
                }
            }
            Effect::ResumeMusic => {
                if let Some(handle) = self.music {
                    audio.resume(handle);
                }
            }
            Effect::StopMusic => {
                if let Some(handle) = self.music.take() {
                    audio.stop(handle);
                }
            }
            Effect::ScheduleTimer { id, delay } => self.services.timers.schedule(id, delay),
            Effect::CancelTimer { id } => self.services.timers.cancel(id),
        }
    }

    fn render(&mut self) -> Result<()> {
        let view = QuizView::build(&self.state, &self.ctx.questions);
        self.services.ui_renderer.render(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionBank;
    use crate::render::MockUIRenderer;
    use crate::session::{Action, Screen, TimerId};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Once(Sound),
        Loop(LoopHandle),
        Pause(LoopHandle),
        Resume(LoopHandle),
        Stop(LoopHandle),
        Schedule(TimerId, Duration),
        Cancel(TimerId),
        Complete(TimerId),
    }

    type Log = Arc<Mutex<Vec<Call>>>;

    struct RecordingAudio {
        log: Log,
        next: u64,
    }

    impl AudioService for RecordingAudio {
        fn play_once(&mut self, sound: Sound, _volume: f32) {
            self.log.lock().unwrap().push(Call::Once(sound));
        }

        fn play_loop(&mut self, _sound: Sound, _volume: f32) -> LoopHandle {
            self.next += 1;
            let handle = LoopHandle(self.next);
            self.log.lock().unwrap().push(Call::Loop(handle));
            handle
        }

        fn pause(&mut self, handle: LoopHandle) {
            self.log.lock().unwrap().push(Call::Pause(handle));
        }

        fn resume(&mut self, handle: LoopHandle) {
            self.log.lock().unwrap().push(Call::Resume(handle));
        }

        fn stop(&mut self, handle: LoopHandle) {
            self.log.lock().unwrap().push(Call::Stop(handle));
        }
    }

    struct RecordingTimers {
        log: Log,
    }

    impl TimerService for RecordingTimers {
        fn schedule(&mut self, id: TimerId, delay: Duration) {
            self.log.lock().unwrap().push(Call::Schedule(id, delay));
        }

        fn cancel(&mut self, id: TimerId) {
            self.log.lock().unwrap().push(Call::Cancel(id));
        }

        fn complete(&mut self, id: TimerId) {
            self.log.lock().unwrap().push(Call::Complete(id));
        }
    }

    fn app() -> (Application, Log, mpsc::UnboundedSender<AppMessage>) {
        let log: Log = Arc::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Services {
            ui_renderer: Box::new(MockUIRenderer::new()),
            audio: Box::new(RecordingAudio {
                log: Arc::clone(&log),
                next: 0,
            }),
            timers: Box::new(RecordingTimers {
                log: Arc::clone(&log),
            }),
        };
        let ctx = SessionContext::new(QuestionBank::standard().unwrap());
        let app = Application::new(ctx, services, AudioConfig::default(), rx);
        (app, log, tx)
    }

    fn press(app: &mut Application, action: Action) {
        assert!(app.process_message(AppMessage::Input(InputAction::Session(action))));
    }

    fn drain(log: &Log) -> Vec<Call> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    #[test]
    fn start_pause_resume_drive_one_music_handle() {
        let (mut app, log, _tx) = app();
        press(&mut app, Action::Confirm);
        press(&mut app, Action::PauseToggle);
        press(&mut app, Action::PauseToggle);

        let handle = LoopHandle(1);
        assert_eq!(
            drain(&log),
            vec![Call::Loop(handle), Call::Pause(handle), Call::Resume(handle)]
        );
        assert_eq!(app.state().screen, Screen::Quiz);
    }

    #[test]
    fn answer_schedules_timer_and_firing_completes_it() {
        let (mut app, log, _tx) = app();
        press(&mut app, Action::Confirm);
        drain(&log);

        press(&mut app, Action::Confirm);
        let calls = drain(&log);
        assert_eq!(calls[0], Call::Once(Sound::Correct));
        let Call::Schedule(id, delay) = calls[1] else {
            panic!("expected a scheduled timer, got {calls:?}");
        };
        assert_eq!(delay, Duration::from_millis(1000));

        assert!(app.process_message(AppMessage::TimerFired(id)));
        assert_eq!(drain(&log), vec![Call::Complete(id)]);
        assert_eq!(app.state().question_index, 1);
        assert_eq!(app.state().correct_count, 1);
    }

    #[test]
    fn reset_combo_cancels_timer_and_stops_music() {
        let (mut app, log, _tx) = app();
        press(&mut app, Action::Confirm);
        press(&mut app, Action::Confirm);
        let id = app.state().pending_timer.map(|p| p.id).unwrap();
        drain(&log);

        for _ in 0..5 {
            press(&mut app, Action::ResetCombo);
        }

        assert_eq!(
            drain(&log),
            vec![Call::Cancel(id), Call::Stop(LoopHandle(1))]
        );
        let state = app.state();
        assert_eq!(state.screen, Screen::Title);
        assert_eq!(state.question_index, 0);
        assert_eq!(state.correct_count, 0);
        assert!(state.pending_timer.is_none());
    }

    #[test]
    fn quit_and_resize_are_handled_by_the_loop() {
        let (mut app, log, _tx) = app();
        assert!(app.process_message(AppMessage::Input(InputAction::Resize {
            width: 100,
            height: 40
        })));
        assert!(!app.process_message(AppMessage::Input(InputAction::Quit)));
        assert!(drain(&log).is_empty());
    }

    #[tokio::test]
    async fn step_stops_when_senders_are_gone() {
        let (mut app, _log, tx) = app();
        tx.send(AppMessage::Input(InputAction::Session(Action::Confirm)))
            .unwrap();
        drop(tx);

        assert!(app.step().await.unwrap());
        assert_eq!(app.state().screen, Screen::Quiz);
        assert!(!app.step().await.unwrap());
    }

    #[tokio::test]
    async fn run_stops_music_on_quit() {
        let (mut app, log, tx) = app();
        tx.send(AppMessage::Input(InputAction::Session(Action::Confirm)))
            .unwrap();
        tx.send(AppMessage::Input(InputAction::Quit)).unwrap();

        app.run().await.unwrap();
        assert_eq!(
            drain(&log),
            vec![Call::Loop(LoopHandle(1)), Call::Stop(LoopHandle(1))]
        );
    }
}
