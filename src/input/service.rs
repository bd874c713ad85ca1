//! High-level input service.
//!
//! Consumes raw terminal events, maps keys onto game actions and yields the
//! `InputAction`s that the application loop consumes.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use crate::session::Action;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// High-level input actions emitted by the input service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// A gameplay action for the session state machine.
    Session(Action),
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
}

impl From<Action> for InputAction {
    fn from(action: Action) -> Self {
        InputAction::Session(action)
    }
}

/// Keyboard bindings.
///
/// The reset key is checked before anything else so a held modifier never turns it
/// into a different action.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyRouter;

impl KeyRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let modifiers = key_event.modifiers;
        let plain = !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Action::ResetCombo.into(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') if plain => Action::PauseToggle.into(),
            KeyCode::Enter => Action::Confirm.into(),
            KeyCode::Char(' ') if plain => Action::Confirm.into(),
            KeyCode::Up => Action::Up.into(),
            KeyCode::Char('k') if plain => Action::Up.into(),
            KeyCode::Down => Action::Down.into(),
            KeyCode::Char('j') if plain => Action::Down.into(),
            KeyCode::Char('q') if plain => InputAction::Quit,
            KeyCode::Esc => InputAction::Quit,
            _ => InputAction::NoAction,
        }
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService {
    router: KeyRouter,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));

            while let Some(extra_event) = self.raw_input.pop_pending() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.pop_pending() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.router.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
        };

        match action {
            InputAction::NoAction => None,
            _ => Some(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn route(code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        KeyRouter::new().handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn bindings_cover_every_action() {
        let none = KeyModifiers::NONE;
        assert_eq!(route(KeyCode::Enter, none), Action::Confirm.into());
        assert_eq!(route(KeyCode::Char(' '), none), Action::Confirm.into());
        assert_eq!(route(KeyCode::Up, none), Action::Up.into());
        assert_eq!(route(KeyCode::Char('k'), none), Action::Up.into());
        assert_eq!(route(KeyCode::Down, none), Action::Down.into());
        assert_eq!(route(KeyCode::Char('j'), none), Action::Down.into());
        assert_eq!(route(KeyCode::Char('p'), none), Action::PauseToggle.into());
        assert_eq!(route(KeyCode::Char('P'), KeyModifiers::SHIFT), Action::PauseToggle.into());
        assert_eq!(route(KeyCode::Char('r'), none), Action::ResetCombo.into());
        assert_eq!(route(KeyCode::Char('q'), none), InputAction::Quit);
        assert_eq!(route(KeyCode::Esc, none), InputAction::Quit);
        assert_eq!(
            route(KeyCode::Char('c'), KeyModifiers::CONTROL),
            InputAction::Quit
        );
    }

    #[test]
    fn reset_key_wins_regardless_of_modifiers() {
        assert_eq!(
            route(KeyCode::Char('R'), KeyModifiers::SHIFT),
            Action::ResetCombo.into()
        );
        assert_eq!(
            route(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Action::ResetCombo.into()
        );
    }

    #[test]
    fn control_chords_do_not_trigger_letter_bindings() {
        assert_eq!(
            route(KeyCode::Char('j'), KeyModifiers::CONTROL),
            InputAction::NoAction
        );
        assert_eq!(
            route(KeyCode::Char('p'), KeyModifiers::ALT),
            InputAction::NoAction
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let mut service = InputService::new();
        assert!(service.process_event(key(KeyCode::Char('x'))).is_empty());
        assert!(service.process_event(key(KeyCode::Tab)).is_empty());
    }

    #[test]
    fn events_preserve_order() {
        let mut service = InputService::new();
        let mut actions = service.process_event(key(KeyCode::Down));
        actions.extend(service.process_event(Event::Resize(80, 24)));
        actions.extend(service.process_event(key(KeyCode::Enter)));

        assert_eq!(
            actions,
            vec![
                Action::Down.into(),
                InputAction::Resize {
                    width: 80,
                    height: 24,
                },
                Action::Confirm.into(),
            ]
        );
    }
}
