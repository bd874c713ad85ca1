//! Session state types

use crate::questions::{QuestionBank, CHOICE_COUNT};
use std::fmt;
use std::time::Duration;

/// Default delay between submitting an answer and the follow-up callback.
pub const DEFAULT_RESULT_DELAY: Duration = Duration::from_millis(1000);

/// Default number of consecutive reset presses that force a return to the title.
pub const DEFAULT_RESET_COMBO_THRESHOLD: u32 = 5;

/// Top-level mode of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Title,
    Quiz,
    Clear,
}

/// Transient overlay shown after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultFlash {
    Correct,
    Incorrect,
}

/// Set of choice indices, stored as a bitmask over `0..CHOICE_COUNT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChoiceSet(u8);

impl ChoiceSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, choice: usize) -> bool {
        choice < CHOICE_COUNT && self.0 & (1 << choice) != 0
    }

    pub fn insert(&mut self, choice: usize) {
        if choice < CHOICE_COUNT {
            self.0 |= 1 << choice;
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.len() >= CHOICE_COUNT
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..CHOICE_COUNT).filter(move |&choice| self.contains(choice))
    }
}

impl FromIterator<usize> for ChoiceSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = ChoiceSet::empty();
        for choice in iter {
            set.insert(choice);
        }
        set
    }
}

/// Identifier of a scheduled result callback. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a result callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// After a correct answer: next question, or the clear screen.
    AdvanceQuestion,
    /// After an incorrect answer: move the cursor off the choice that was tried.
    ReleaseCursor { tried: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingTimer {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// The single mutable aggregate describing a play session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionState {
    pub screen: Screen,
    pub question_index: usize,
    pub correct_count: usize,
    pub selected_choice: usize,
    pub eliminated: ChoiceSet,
    pub result_flash: Option<ResultFlash>,
    pub paused: bool,
    pub reset_combo_count: u32,
    pub pending_timer: Option<PendingTimer>,
    /// The pending timer fired while paused and runs when play resumes.
    pub timer_due: bool,
    /// Survives resets so callbacks scheduled before a reset can never match.
    pub next_timer_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Title,
            question_index: 0,
            correct_count: 0,
            selected_choice: 0,
            eliminated: ChoiceSet::empty(),
            result_flash: None,
            paused: false,
            reset_combo_count: 0,
            pending_timer: None,
            timer_due: false,
            next_timer_id: 1,
        }
    }

    /// Back to the initial configuration, keeping the timer id sequence.
    pub fn reset(&mut self) {
        let next_timer_id = self.next_timer_id;
        *self = Self::new();
        self.next_timer_id = next_timer_id;
    }

    pub fn is_showing_result(&self) -> bool {
        self.result_flash.is_some()
    }

    /// Reserve the next timer id.
    pub fn allocate_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        id
    }

    /// Switch screens; any screen change clears the reset combo.
    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.reset_combo_count = 0;
        }
    }
}

/// Immutable inputs to the transition function.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub questions: QuestionBank,
    pub result_delay: Duration,
    pub reset_combo_threshold: u32,
}

impl SessionContext {
    pub fn new(questions: QuestionBank) -> Self {
        Self {
            questions,
            result_delay: DEFAULT_RESULT_DELAY,
            reset_combo_threshold: DEFAULT_RESET_COMBO_THRESHOLD,
        }
    }

    pub fn with_result_delay(mut self, delay: Duration) -> Self {
        self.result_delay = delay;
        self
    }

    pub fn with_reset_combo_threshold(mut self, threshold: u32) -> Self {
        self.reset_combo_threshold = threshold.max(1);
        self
    }
}
