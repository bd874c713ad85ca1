use crate::app::messages::AppMessage;
use crate::error::Result;
use crate::input::{GamepadRouter, GamepadSource, InputAction, InputService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Spawn a blocking thread that collects terminal input and forwards actions onto a channel.
pub fn spawn_input_thread(
    tx: UnboundedSender<AppMessage>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("quizbox-keyboard".to_string())
        .spawn(move || {
            let mut service = InputService::new();
            while !shutdown.load(Ordering::SeqCst) {
                match service.poll_actions(Some(poll_interval)) {
                    Ok(actions) => {
                        for action in actions {
                            if tx.send(action.into()).is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        // Without a keyboard there is no way to quit, so stop the loop.
                        log::error!("keyboard input failed: {err}");
                        let _ = tx.send(InputAction::Quit.into());
                        break;
                    }
                }
            }
        })?;
    Ok(handle)
}

/// Spawn a thread that samples a gamepad at a fixed interval.
///
/// `make_source` runs on the new thread, since controller handles are usually not
/// `Send`. If it fails the thread logs a warning and exits; keyboard play is unaffected.
pub fn spawn_gamepad_thread<S, F>(
    make_source: F,
    tx: UnboundedSender<AppMessage>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> Result<thread::JoinHandle<()>>
where
    S: GamepadSource,
    F: FnOnce() -> Result<S> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("quizbox-gamepad".to_string())
        .spawn(move || {
            let mut source = match make_source() {
                Ok(source) => source,
                Err(err) => {
                    log::warn!("gamepad unavailable, continuing with keyboard only: {err}");
                    return;
                }
            };
            let mut router = GamepadRouter::new();
            while !shutdown.load(Ordering::SeqCst) {
                if let Some(action) = router.route(source.poll()) {
                    log::debug!("gamepad action {action:?}");
                    if tx.send(InputAction::Session(action).into()).is_err() {
                        return;
                    }
                }
                thread::sleep(poll_interval);
            }
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GamepadSnapshot;
    use crate::session::Action;
    use std::collections::VecDeque;
    use tokio::sync::mpsc;

    struct Scripted {
        frames: VecDeque<Option<GamepadSnapshot>>,
        shutdown: Arc<AtomicBool>,
    }

    impl GamepadSource for Scripted {
        fn poll(&mut self) -> Option<GamepadSnapshot> {
            match self.frames.pop_front() {
                Some(frame) => frame,
                None => {
                    self.shutdown.store(true, Ordering::SeqCst);
                    None
                }
            }
        }
    }

    #[test]
    fn gamepad_thread_forwards_edges_only() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let south = Some(GamepadSnapshot {
            south: true,
            ..GamepadSnapshot::default()
        });
        let source = Scripted {
            frames: VecDeque::from(vec![south, south, None, south]),
            shutdown: Arc::clone(&shutdown),
        };

        let handle =
            spawn_gamepad_thread(move || Ok(source), tx, shutdown, Duration::from_millis(1))
                .unwrap();
        handle.join().unwrap();

        let confirm = AppMessage::Input(InputAction::Session(Action::Confirm));
        assert_eq!(rx.try_recv(), Ok(confirm));
        assert_eq!(rx.try_recv(), Ok(confirm));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failed_gamepad_source_ends_thread_quietly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = spawn_gamepad_thread(
            || -> Result<crate::input::NoGamepad> {
                Err(crate::error::QuizError::gamepad("no backend"))
            },
            tx,
            shutdown,
            Duration::from_millis(1),
        )
        .unwrap();
        handle.join().unwrap();

        assert!(rx.try_recv().is_err());
    }
}
