//! Read-only view model handed to renderers.
//!
//! Everything a renderer needs is resolved here (labels, cursor, dimming) so that
//! renderers stay dumb and the formatting rules can be tested without a terminal.

use crate::questions::QuestionBank;
use crate::session::{ResultFlash, Screen, SessionState};

pub const GAME_TITLE: &str = "クイズゲーム";
pub const CLEAR_TITLE: &str = "クリア！";
pub const TITLE_PROMPT: &str = "Enter でスタート";
pub const PAUSE_BANNER: &str = "PAUSE";

/// Convert ASCII digits to their full-width forms (`12` → `１２`).
pub fn to_full_width(number: usize) -> String {
    number
        .to_string()
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(digit) => char::from_u32(0xFF10 + digit).unwrap_or(ch),
            None => ch,
        })
        .collect()
}

/// One choice line as it should appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: String,
    /// Cursor is drawn only when the selected choice is still viable.
    pub has_cursor: bool,
    pub eliminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number_label: String,
    pub score_label: String,
    pub prompt: &'static str,
    pub choices: Vec<ChoiceView>,
    pub flash: Option<ResultFlash>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub screen: Screen,
    pub paused: bool,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Present only on the quiz screen.
    pub question: Option<QuestionView>,
}

impl QuizView {
    pub fn build(state: &SessionState, questions: &QuestionBank) -> Self {
        let question = match state.screen {
            Screen::Quiz => questions
                .get(state.question_index)
                .map(|current| QuestionView {
                    number_label: format!("だい{}もん", to_full_width(state.question_index + 1)),
                    score_label: format!("せいかいすう {}もん", to_full_width(state.correct_count)),
                    prompt: current.prompt,
                    choices: current
                        .choices
                        .iter()
                        .enumerate()
                        .map(|(index, text)| {
                            let eliminated = state.eliminated.contains(index);
                            ChoiceView {
                                label: format!("{}．{}", to_full_width(index + 1), text),
                                has_cursor: index == state.selected_choice && !eliminated,
                                eliminated,
                            }
                        })
                        .collect(),
                    flash: state.result_flash,
                }),
            Screen::Title | Screen::Clear => None,
        };

        Self {
            screen: state.screen,
            paused: state.paused,
            correct_count: state.correct_count,
            total_questions: questions.len(),
            question,
        }
    }

    pub fn clear_message(&self) -> String {
        format!(
            "{}／{}もん せいかい",
            to_full_width(self.correct_count),
            to_full_width(self.total_questions)
        )
    }
}
