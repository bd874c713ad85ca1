//! Property-based tests for the session state machine
//!
//! Random action sequences, interleaved with timer firings (current and stale), must
//! never break the session invariants.

use super::*;
use crate::questions::{QuestionBank, CHOICE_COUNT};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new(QuestionBank::standard().unwrap())
}

/// Symbolic step; timer steps are resolved against the state at execution time.
#[derive(Debug, Clone, Copy)]
enum Step {
    Input(Action),
    FirePending,
    FireStale,
}

fn resolve(step: Step, state: &SessionState) -> Option<Event> {
    match step {
        Step::Input(action) => Some(Event::Input(action)),
        Step::FirePending => state
            .pending_timer
            .map(|pending| Event::TimerFired { id: pending.id }),
        // Pending ids are always below `next_timer_id`.
        Step::FireStale => Some(Event::TimerFired {
            id: TimerId(state.next_timer_id + 1000),
        }),
    }
}

fn check_invariants(state: &SessionState, ctx: &SessionContext) -> Result<(), TestCaseError> {
    prop_assert!(state.selected_choice < CHOICE_COUNT);
    prop_assert!(state.reset_combo_count < ctx.reset_combo_threshold);
    prop_assert!(state.correct_count <= ctx.questions.len());

    if state.screen == Screen::Quiz {
        let question = ctx.questions.get(state.question_index).unwrap();
        prop_assert!(!state.eliminated.is_full());
        prop_assert!(!state.eliminated.contains(question.answer));
        prop_assert!(state.correct_count <= state.question_index + 1);
        if state.result_flash.is_none() {
            prop_assert!(!state.eliminated.contains(state.selected_choice));
        }
    }

    // A result overlay always has a callback that will clear it.
    prop_assert_eq!(state.result_flash.is_some(), state.pending_timer.is_some());
    if state.timer_due {
        prop_assert!(state.paused);
        prop_assert!(state.pending_timer.is_some());
    }
    Ok(())
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Confirm),
        3 => Just(Action::Up),
        3 => Just(Action::Down),
        1 => Just(Action::PauseToggle),
        1 => Just(Action::ResetCombo),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => arb_action().prop_map(Step::Input),
        3 => Just(Step::FirePending),
        1 => Just(Step::FireStale),
    ]
}

fn arb_gameplay_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Confirm), Just(Action::Up), Just(Action::Down)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_for_random_sequences(steps in prop::collection::vec(arb_step(), 0..200)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in steps {
            let Some(event) = resolve(step, &state) else { continue };
            state = transition(&state, &ctx, event).new_state;
            check_invariants(&state, &ctx)?;
        }
    }

    #[test]
    fn correct_count_only_grows_outside_resets(steps in prop::collection::vec(arb_step(), 0..200)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in steps {
            let Some(event) = resolve(step, &state) else { continue };
            let before = state.correct_count;
            let result = transition(&state, &ctx, event);
            let after = result.new_state.correct_count;

            let was_reset = event == Event::Input(Action::ResetCombo)
                && state.reset_combo_count + 1 >= ctx.reset_combo_threshold;
            if !was_reset {
                prop_assert!(after >= before);
                prop_assert!(after <= before + 1);
            }
            state = result.new_state;
        }
    }

    #[test]
    fn stale_timers_never_change_state(steps in prop::collection::vec(arb_step(), 0..100)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in steps {
            let Some(event) = resolve(step, &state) else { continue };
            state = transition(&state, &ctx, event).new_state;

            let stale = resolve(Step::FireStale, &state).unwrap();
            let result = transition(&state, &ctx, stale);
            prop_assert_eq!(result.ignored, Some(IgnoreReason::StaleTimer));
            prop_assert_eq!(&result.new_state, &state);
            prop_assert!(result.effects.is_empty());
        }
    }

    #[test]
    fn paused_state_ignores_gameplay(
        prefix in prop::collection::vec(arb_step(), 0..80),
        actions in prop::collection::vec(arb_gameplay_action(), 1..20),
    ) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in prefix {
            let Some(event) = resolve(step, &state) else { continue };
            state = transition(&state, &ctx, event).new_state;
        }
        if !state.paused {
            state = transition(&state, &ctx, Event::Input(Action::PauseToggle)).new_state;
        }
        let frozen = state.clone();
        for action in actions {
            let result = transition(&state, &ctx, Event::Input(action));
            prop_assert_eq!(result.ignored, Some(IgnoreReason::Paused));
            prop_assert!(result.effects.is_empty());
            state = result.new_state;
        }
        prop_assert_eq!(state.screen, frozen.screen);
        prop_assert_eq!(state.selected_choice, frozen.selected_choice);
        prop_assert_eq!(state.correct_count, frozen.correct_count);
        prop_assert_eq!(state.question_index, frozen.question_index);
    }

    #[test]
    fn held_timer_matches_an_unpaused_firing(prefix in prop::collection::vec(arb_step(), 0..120)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in prefix {
            let Some(event) = resolve(step, &state) else { continue };
            state = transition(&state, &ctx, event).new_state;
        }
        if state.paused {
            state = transition(&state, &ctx, Event::Input(Action::PauseToggle)).new_state;
        }
        let Some(pending) = state.pending_timer else { return Ok(()) };
        let fired = Event::TimerFired { id: pending.id };
        let direct = transition(&state, &ctx, fired).new_state;

        let paused = transition(&state, &ctx, Event::Input(Action::PauseToggle)).new_state;
        let held = transition(&paused, &ctx, fired);
        prop_assert_eq!(held.ignored, Some(IgnoreReason::Paused));
        prop_assert_eq!(held.new_state.question_index, state.question_index);
        prop_assert_eq!(held.new_state.result_flash, state.result_flash);

        let unpause = Event::Input(Action::PauseToggle);
        let resumed = transition(&held.new_state, &ctx, unpause).new_state;
        // The pause presses themselves break any reset combo in progress.
        prop_assert_eq!(resumed, SessionState { reset_combo_count: 0, ..direct });
    }

    #[test]
    fn reset_combo_always_returns_to_title(prefix in prop::collection::vec(arb_step(), 0..150)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for step in prefix {
            let Some(event) = resolve(step, &state) else { continue };
            state = transition(&state, &ctx, event).new_state;
        }
        let pending = state.pending_timer;
        let mut effects = Vec::new();
        for _ in 0..ctx.reset_combo_threshold {
            let result = transition(&state, &ctx, Event::Input(Action::ResetCombo));
            effects.extend(result.effects);
            state = result.new_state;
        }
        prop_assert_eq!(state.screen, Screen::Title);
        prop_assert_eq!(state.question_index, 0);
        prop_assert_eq!(state.correct_count, 0);
        prop_assert!(!state.paused);
        prop_assert!(state.pending_timer.is_none());
        if let Some(pending) = pending {
            let cancel = Effect::CancelTimer { id: pending.id };
            prop_assert!(effects.contains(&cancel), "reset did not cancel {:?}", pending);
        }
    }

    #[test]
    fn directional_moves_land_on_viable_choices(
        moves in prop::collection::vec(prop_oneof![Just(Action::Up), Just(Action::Down)], 1..30),
        wrong_first in any::<bool>(),
    ) {
        let ctx = test_context();
        let mut state = transition(&SessionState::new(), &ctx, Event::Input(Action::Confirm)).new_state;
        if wrong_first {
            // Question 1's answer is 0; submit choice 1 and let the overlay clear.
            state = transition(&state, &ctx, Event::Input(Action::Down)).new_state;
            state = transition(&state, &ctx, Event::Input(Action::Confirm)).new_state;
            let id = state.pending_timer.unwrap().id;
            state = transition(&state, &ctx, Event::TimerFired { id }).new_state;
        }
        for action in moves {
            state = transition(&state, &ctx, Event::Input(action)).new_state;
            prop_assert!(!state.eliminated.contains(state.selected_choice));
        }
    }
}
