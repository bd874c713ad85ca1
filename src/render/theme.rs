//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the quiz screens
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Title and clear-screen headline
    pub headline: Style,

    /// Question number and score counters
    pub counter: Style,

    /// Question text
    pub prompt: Style,

    /// Viable, unselected choice
    pub choice: Style,

    /// Choice under the cursor
    pub selected_choice: Style,

    /// Choice already answered incorrectly
    pub eliminated_choice: Style,

    /// ○ overlay
    pub correct_mark: Style,

    /// × overlay
    pub incorrect_mark: Style,

    /// PAUSE banner
    pub pause_banner: Style,

    /// Key hints along the bottom edge
    pub hint: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            headline: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            counter: Style::default().fg(Color::Cyan),
            prompt: Style::default().fg(Color::White),
            choice: Style::default().fg(Color::White),
            selected_choice: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            eliminated_choice: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            correct_mark: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            incorrect_mark: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            pause_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

impl ColorTheme {
    /// Theme for terminals without color support
    pub fn monochrome() -> Self {
        let plain = Style::default();
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        Self {
            headline: Style::default().add_modifier(Modifier::BOLD),
            counter: plain,
            prompt: plain,
            choice: plain,
            selected_choice: reversed,
            eliminated_choice: Style::default().add_modifier(Modifier::DIM),
            correct_mark: Style::default().add_modifier(Modifier::BOLD),
            incorrect_mark: Style::default().add_modifier(Modifier::BOLD),
            pause_banner: reversed,
            hint: plain,
        }
    }
}
