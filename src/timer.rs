//! Cancellable result timers.
//!
//! A timer is a tokio task that sleeps and then posts [`AppMessage::TimerFired`] onto
//! the application channel, so a firing is serialized with input like any other
//! message. Cancelling aborts the task; a message that was already queued is dropped
//! by the state machine because its id no longer matches the pending timer.

use crate::app::messages::AppMessage;
use crate::session::TimerId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Scheduling interface used by the application loop.
pub trait TimerService: Send {
    /// Deliver `TimerFired { id }` after `delay`.
    fn schedule(&mut self, id: TimerId, delay: Duration);

    /// Best-effort cancellation of a scheduled timer.
    fn cancel(&mut self, id: TimerId);

    /// Forget bookkeeping for a timer whose message has been received.
    fn complete(&mut self, id: TimerId);
}

/// Timers backed by tokio tasks. Must be used from within a tokio runtime.
pub struct TokioTimers {
    tx: UnboundedSender<AppMessage>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimers {
    pub fn new(tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
        }
    }

    /// Number of timers that have been scheduled and neither fired nor been cancelled.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }
}

impl TimerService for TokioTimers {
    fn schedule(&mut self, id: TimerId, delay: Duration) {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The loop may already be gone during shutdown.
            let _ = tx.send(AppMessage::TimerFired(id));
        });
        if let Some(previous) = self.tasks.insert(id, task) {
            previous.abort();
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }

    fn complete(&mut self, id: TimerId) {
        self.tasks.remove(&id);
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
