//! Property-based tests for the machine's construction rules, head movement and
//! halting policy.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines and tapes.

use proptest::prelude::*;
use tmsim::{Direction, Machine, MachineError, MachineOptions, Outcome, RunOptions, State, StateKind};

prop_compose! {
    fn arbitrary_kind()(variant in 0..4u8) -> StateKind {
        match variant {
            0 => StateKind::Start,
            1 => StateKind::Accepting,
            2 => StateKind::Rejecting,
            _ => StateKind::Normal,
        }
    }
}

prop_compose! {
    fn arbitrary_tape()(symbols in prop::collection::vec(prop::sample::select(vec!['a', 'b']), 0..12)) -> Vec<char> {
        symbols
    }
}

/// A start state that moves `direction` on every symbol and stays in itself, plus
/// the halting states construction requires.
fn walker(direction: Direction) -> Vec<State> {
    let start = ['a', 'b', '_']
        .into_iter()
        .fold(State::new("S", StateKind::Start), |state, symbol| {
            state.add_transition(symbol, "S", 'x', direction)
        });
    vec![
        start,
        State::new("A", StateKind::Accepting),
        State::new("R", StateKind::Rejecting),
    ]
}

fn options(implicit_reject: bool) -> MachineOptions {
    MachineOptions {
        implicit_reject,
        ..MachineOptions::default()
    }
}

proptest! {
    #[test]
    fn construction_validates_state_kinds(
        kinds in prop::collection::vec(arbitrary_kind(), 0..6),
        implicit_reject in any::<bool>(),
    ) {
        let count = |kind| kinds.iter().filter(|&&k| k == kind).count();
        let should_fail = count(StateKind::Start) != 1
            || count(StateKind::Accepting) == 0
            || (count(StateKind::Rejecting) == 0 && !implicit_reject);

        let states = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| State::new(format!("q{}", i), kind))
            .collect();
        let result = Machine::new(states, vec![], options(implicit_reject));

        prop_assert_eq!(result.is_err(), should_fail);
        if let Err(err) = result {
            prop_assert!(matches!(err, MachineError::Configuration(_)));
        }
    }

    #[test]
    fn step_at_end_of_tape_extends_by_one_cell(tape in arbitrary_tape()) {
        let len = tape.len();
        let mut machine = Machine::with_defaults(walker(Direction::Right), tape).unwrap();
        machine.set_head_position(len).unwrap();

        machine.step().unwrap();

        prop_assert_eq!(machine.tape().len(), len + 1);
        prop_assert_eq!(machine.tape()[len], 'x');
    }

    #[test]
    fn step_left_at_origin_inserts_cell(tape in arbitrary_tape()) {
        let len = tape.len().max(1);
        let mut machine = Machine::with_defaults(walker(Direction::Left), tape).unwrap();

        machine.step().unwrap();

        prop_assert_eq!(machine.head_position(), 0);
        prop_assert_eq!(machine.tape().len(), len + 1);
        prop_assert_eq!(machine.tape()[0], '_');
        prop_assert_eq!(machine.tape()[1], 'x');
    }

    #[test]
    fn step_left_elsewhere_decrements_head(tape in arbitrary_tape(), offset in 0usize..12) {
        prop_assume!(!tape.is_empty());
        let len = tape.len();
        let head = 1 + offset % len;
        let mut machine = Machine::with_defaults(walker(Direction::Left), tape).unwrap();
        machine.set_head_position(head).unwrap();

        machine.step().unwrap();

        prop_assert_eq!(machine.head_position(), head - 1);
        let expected_len = if head == len { len + 1 } else { len };
        prop_assert_eq!(machine.tape().len(), expected_len);
    }

    #[test]
    fn step_right_increments_head(tape in arbitrary_tape(), offset in 0usize..13) {
        let head = offset % (tape.len() + 1);
        let mut machine = Machine::with_defaults(walker(Direction::Right), tape).unwrap();
        machine.set_head_position(head).unwrap();

        machine.step().unwrap();

        prop_assert_eq!(machine.head_position(), head + 1);
        prop_assert!(machine.head_position() <= machine.tape().len());
    }

    #[test]
    fn step_requires_exactly_one_matching_transition(matches in 0usize..4) {
        let start = (0..matches).fold(State::new("S", StateKind::Start), |state, _| {
            state.add_transition('_', "A", '_', Direction::Right)
        });
        let states = vec![
            start,
            State::new("A", StateKind::Accepting),
            State::new("R", StateKind::Rejecting),
        ];
        let mut machine = Machine::with_defaults(states, vec![]).unwrap();

        match machine.step() {
            Ok(()) => prop_assert_eq!(matches, 1),
            Err(MachineError::NonDeterministicTransition { matches: found, .. }) => {
                prop_assert_ne!(matches, 1);
                prop_assert_eq!(found, matches);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn run_halts_only_within_budget(
        length in 0usize..20,
        accept in any::<bool>(),
        max_steps in 0usize..30,
    ) {
        let target = if accept { "A" } else { "R" };
        let states = vec![
            State::new("S", StateKind::Start)
                .add_transition('a', "S", 'a', Direction::Right)
                .add_transition('_', target, '_', Direction::Right),
            State::new("A", StateKind::Accepting),
            State::new("R", StateKind::Rejecting),
        ];
        let mut machine = Machine::with_defaults(states, vec!['a'; length]).unwrap();

        let outcome = machine
            .run_with(&RunOptions { max_steps, ..RunOptions::default() })
            .unwrap();

        // `length + 1` steps, then one more iteration to observe the halting state.
        let expected = if max_steps < length + 2 {
            Outcome::StepLimitExceeded
        } else if accept {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        };
        prop_assert_eq!(outcome, expected);
    }

    #[test]
    fn implicit_reject_never_raises_on_missing_transition(tape in arbitrary_tape()) {
        let states = vec![
            State::new("S", StateKind::Start).add_transition('a', "S", 'a', Direction::Right),
            State::new("A", StateKind::Accepting),
        ];
        let mut machine = Machine::new(states, tape, options(true)).unwrap();

        prop_assert_eq!(machine.run().unwrap(), Outcome::Rejected);
        prop_assert!(machine.current_state().is_none());
    }
}
