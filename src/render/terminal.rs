//! Terminal UI implementation using ratatui
//!
//! `TerminalUI` owns the crossterm-backed terminal. Drawing itself lives in
//! [`draw_view`], which works on any ratatui `Frame` so it can be exercised against
//! a `TestBackend`.

use crate::error::{QuizError, Result};
use crate::render::renderer::UIRenderer;
use crate::render::theme::ColorTheme;
use crate::render::view::{
    QuestionView, QuizView, CLEAR_TITLE, GAME_TITLE, PAUSE_BANNER, TITLE_PROMPT,
};
use crate::session::{ResultFlash, Screen};
use ratatui::crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const CURSOR: &str = "▶ ";
const NO_CURSOR: &str = "  ";
const TITLE_HINT: &str = "Enter: けってい  ↑↓/jk: えらぶ  p: ポーズ  q: おわる";
const QUIZ_HINT: &str = "Enter: こたえる  ↑↓: えらぶ  p: ポーズ  r×5: タイトルへ";
const CLEAR_HINT: &str = "r を５かい おすと タイトルへ  q: おわる";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Self {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view: &QuizView) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal
                .draw(|frame| draw_view(frame, view, theme))
                .map_err(|err| QuizError::ui(format!("draw failed: {err}")))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        let setup_failed = |err: io::Error| QuizError::ui(format!("terminal setup failed: {err}"));

        enable_raw_mode().map_err(setup_failed)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).map_err(setup_failed)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(setup_failed)?;
        terminal.clear().map_err(setup_failed)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, Show)?;
            self.terminal = None;
        }
        Ok(())
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Draw one complete frame.
pub fn draw_view(frame: &mut Frame, view: &QuizView, theme: &ColorTheme) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let hint = match view.screen {
        Screen::Title => {
            draw_title(frame, chunks[0], theme);
            TITLE_HINT
        }
        Screen::Quiz => {
            if let Some(question) = &view.question {
                draw_question(frame, chunks[0], question, theme);
            }
            QUIZ_HINT
        }
        Screen::Clear => {
            draw_clear(frame, chunks[0], view, theme);
            CLEAR_HINT
        }
    };

    frame.render_widget(
        Paragraph::new(hint)
            .style(theme.hint)
            .alignment(Alignment::Center),
        chunks[1],
    );

    if view.paused {
        draw_overlay(frame, area, PAUSE_BANNER, theme.pause_banner);
    }
}

fn draw_title(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
    let lines = vec![
        Line::styled(GAME_TITLE, theme.headline),
        Line::raw(""),
        Line::styled(TITLE_PROMPT, theme.prompt),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertically_centered(area, 3),
    );
}

fn draw_clear(frame: &mut Frame, area: Rect, view: &QuizView, theme: &ColorTheme) {
    let lines = vec![
        Line::styled(CLEAR_TITLE, theme.headline),
        Line::raw(""),
        Line::styled(view.clear_message(), theme.counter),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertically_centered(area, 3),
    );
}

fn draw_question(frame: &mut Frame, area: Rect, question: &QuestionView, theme: &ColorTheme) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let choice_rows = question.choices.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(choice_rows),
        ])
        .split(inner);

    let counters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    frame.render_widget(
        Paragraph::new(question.number_label.as_str()).style(theme.counter),
        counters[0],
    );
    frame.render_widget(
        Paragraph::new(question.score_label.as_str())
            .style(theme.counter)
            .alignment(Alignment::Right),
        counters[1],
    );

    frame.render_widget(
        Paragraph::new(question.prompt)
            .style(theme.prompt)
            .wrap(Wrap { trim: false }),
        chunks[2],
    );

    let choices: Vec<Line> = question
        .choices
        .iter()
        .map(|choice| {
            let (marker, style) = if choice.eliminated {
                (NO_CURSOR, theme.eliminated_choice)
            } else if choice.has_cursor {
                (CURSOR, theme.selected_choice)
            } else {
                (NO_CURSOR, theme.choice)
            };
            Line::from(vec![Span::raw(marker), Span::styled(choice.label.as_str(), style)])
        })
        .collect();
    frame.render_widget(Paragraph::new(choices), chunks[4]);

    match question.flash {
        Some(ResultFlash::Correct) => draw_overlay(frame, area, "○", theme.correct_mark),
        Some(ResultFlash::Incorrect) => draw_overlay(frame, area, "×", theme.incorrect_mark),
        None => {}
    }
}

/// Boxed text centered over whatever is already drawn.
fn draw_overlay(frame: &mut Frame, area: Rect, text: &str, style: ratatui::style::Style) {
    let rect = centered_rect(area, 11, 3);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::styled(text, style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style)),
        rect,
    );
}

fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
