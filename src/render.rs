//! Rendering subsystem.
//!
//! Session snapshots are turned into a [`QuizView`] and handed to a [`UIRenderer`];
//! the terminal implementation draws it with ratatui.

pub mod renderer;
pub mod terminal;
pub mod theme;
pub mod view;

pub use renderer::UIRenderer;
pub use terminal::TerminalUI;
pub use theme::ColorTheme;
pub use view::{to_full_width, ChoiceView, QuestionView, QuizView};

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
