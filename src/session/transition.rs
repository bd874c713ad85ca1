//! Pure state transition function
//!
//! Given the same state, context and event this always produces the same result. All
//! I/O is described as [`Effect`]s for the caller to execute.

use super::state::{ChoiceSet, PendingTimer, ResultFlash, Screen, TimerId, TimerKind};
use super::{Action, Effect, Event, SessionContext, SessionState, Sound};
use crate::questions::CHOICE_COUNT;

/// Why an event was dropped without changing gameplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Paused,
    WrongScreen,
    ResultShowing,
    ChoiceEliminated,
    NoEligibleChoice,
    StaleTimer,
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
    pub ignored: Option<IgnoreReason>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
            ignored: None,
        }
    }

    pub fn ignored(state: SessionState, reason: IgnoreReason) -> Self {
        Self {
            new_state: state,
            effects: vec![],
            ignored: Some(reason),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Backward,
    Forward,
}

impl Step {
    fn apply(self, choice: usize) -> usize {
        match self {
            Step::Backward => (choice + CHOICE_COUNT - 1) % CHOICE_COUNT,
            Step::Forward => (choice + 1) % CHOICE_COUNT,
        }
    }
}

/// First index reachable from `from` in direction `step` that is not `blocked`.
///
/// Walks at most one full loop and returns `None` when it arrives back at `from`.
fn step_to_eligible(from: usize, step: Step, blocked: ChoiceSet) -> Option<usize> {
    let mut candidate = from;
    for _ in 0..CHOICE_COUNT {
        candidate = step.apply(candidate);
        if candidate == from {
            return None;
        }
        if !blocked.contains(candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Pure transition function
pub fn transition(state: &SessionState, ctx: &SessionContext, event: Event) -> TransitionResult {
    match event {
        Event::Input(action) => handle_input(state.clone(), ctx, action),
        Event::TimerFired { id } => handle_timer(state, ctx, id),
    }
}

fn handle_input(mut next: SessionState, ctx: &SessionContext, action: Action) -> TransitionResult {
    if action == Action::ResetCombo {
        return register_reset_press(next, ctx);
    }

    // Only consecutive reset presses count toward the combo.
    next.reset_combo_count = 0;

    if action == Action::PauseToggle {
        return toggle_pause(next, ctx);
    }

    if next.paused && !action.bypasses_pause() {
        return TransitionResult::ignored(next, IgnoreReason::Paused);
    }

    match (next.screen, action) {
        (Screen::Title, Action::Confirm) => start_quiz(next),
        (Screen::Quiz, Action::Up) => move_cursor(next, Step::Backward),
        (Screen::Quiz, Action::Down) => move_cursor(next, Step::Forward),
        (Screen::Quiz, Action::Confirm) => submit_answer(next, ctx),
        _ => TransitionResult::ignored(next, IgnoreReason::WrongScreen),
    }
}

fn register_reset_press(mut next: SessionState, ctx: &SessionContext) -> TransitionResult {
    next.reset_combo_count += 1;
    if next.reset_combo_count < ctx.reset_combo_threshold {
        return TransitionResult::new(next);
    }

    let mut effects = Vec::new();
    if let Some(pending) = next.pending_timer {
        effects.push(Effect::CancelTimer { id: pending.id });
    }
    if next.screen == Screen::Quiz {
        effects.push(Effect::StopMusic);
    }
    next.reset();
    TransitionResult::new(next).with_effects(effects)
}

fn toggle_pause(mut next: SessionState, ctx: &SessionContext) -> TransitionResult {
    next.paused = !next.paused;
    let mut effects = Vec::new();
    if next.screen == Screen::Quiz {
        effects.push(if next.paused {
            Effect::PauseMusic
        } else {
            Effect::ResumeMusic
        });
    }

    if !next.paused && next.timer_due {
        if let Some(pending) = next.pending_timer {
            let resumed = run_pending(next, ctx, pending);
            return TransitionResult::new(resumed.new_state)
                .with_effects(effects)
                .with_effects(resumed.effects);
        }
    }
    TransitionResult::new(next).with_effects(effects)
}

fn start_quiz(mut next: SessionState) -> TransitionResult {
    next.set_screen(Screen::Quiz);
    next.question_index = 0;
    next.correct_count = 0;
    next.selected_choice = 0;
    next.eliminated.clear();
    next.result_flash = None;
    next.pending_timer = None;
    next.timer_due = false;
    TransitionResult::new(next).with_effect(Effect::StartMusic)
}

fn move_cursor(mut next: SessionState, step: Step) -> TransitionResult {
    if next.is_showing_result() {
        return TransitionResult::ignored(next, IgnoreReason::ResultShowing);
    }

    match step_to_eligible(next.selected_choice, step, next.eliminated) {
        Some(choice) => {
            next.selected_choice = choice;
            TransitionResult::new(next).with_effect(Effect::PlaySound(Sound::Select))
        }
        None => TransitionResult::ignored(next, IgnoreReason::NoEligibleChoice),
    }
}

fn submit_answer(mut next: SessionState, ctx: &SessionContext) -> TransitionResult {
    if next.is_showing_result() {
        return TransitionResult::ignored(next, IgnoreReason::ResultShowing);
    }
    let choice = next.selected_choice;
    if next.eliminated.contains(choice) {
        return TransitionResult::ignored(next, IgnoreReason::ChoiceEliminated);
    }
    let Some(question) = ctx.questions.get(next.question_index) else {
        return TransitionResult::ignored(next, IgnoreReason::WrongScreen);
    };

    let id = next.allocate_timer();
    let (sound, kind) = if question.is_correct(choice) {
        next.result_flash = Some(ResultFlash::Correct);
        next.correct_count += 1;
        (Sound::Correct, TimerKind::AdvanceQuestion)
    } else {
        next.result_flash = Some(ResultFlash::Incorrect);
        next.eliminated.insert(choice);
        (Sound::Incorrect, TimerKind::ReleaseCursor { tried: choice })
    };
    next.pending_timer = Some(PendingTimer { id, kind });

    TransitionResult::new(next)
        .with_effect(Effect::PlaySound(sound))
        .with_effect(Effect::ScheduleTimer {
            id,
            delay: ctx.result_delay,
        })
}

fn handle_timer(state: &SessionState, ctx: &SessionContext, id: TimerId) -> TransitionResult {
    let mut next = state.clone();
    let pending = match next.pending_timer {
        Some(pending) if pending.id == id => pending,
        _ => return TransitionResult::ignored(next, IgnoreReason::StaleTimer),
    };
    if next.paused {
        // Held until the pause is lifted.
        next.timer_due = true;
        return TransitionResult::ignored(next, IgnoreReason::Paused);
    }
    run_pending(next, ctx, pending)
}

/// Apply a result callback: clear the overlay, then advance or release the cursor.
fn run_pending(
    mut next: SessionState,
    ctx: &SessionContext,
    pending: PendingTimer,
) -> TransitionResult {
    let cursor_before = next.selected_choice;
    next.pending_timer = None;
    next.timer_due = false;
    next.result_flash = None;

    let mut effects = Vec::new();
    match pending.kind {
        TimerKind::AdvanceQuestion => {
            if next.question_index < ctx.questions.last_index() {
                next.question_index += 1;
                next.selected_choice = 0;
                next.eliminated.clear();
            } else {
                next.set_screen(Screen::Clear);
                effects.push(Effect::StopMusic);
            }
        }
        TimerKind::ReleaseCursor { tried } => {
            let mut blocked = next.eliminated;
            blocked.insert(tried);
            if let Some(choice) = step_to_eligible(next.selected_choice, Step::Forward, blocked) {
                next.selected_choice = choice;
            }
        }
    }

    if next.screen == Screen::Quiz && next.selected_choice != cursor_before {
        effects.push(Effect::PlaySound(Sound::Select));
    }
    TransitionResult::new(next).with_effects(effects)
}
