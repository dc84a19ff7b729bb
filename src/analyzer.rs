//! This module provides static checks over a set of states, catching definition mistakes
//! that `Machine` would otherwise only report when the offending transition fires.
//!
//! Construction never calls into this module; it is an opt-in lint.

use crate::state::State;
use crate::types::{MachineError, StateKind};
use std::collections::{HashMap, HashSet};

/// Represents the problems `analyze` can find in a state set.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The number of `Start` states is not exactly one.
    InvalidStartState(usize),
    /// Several states share a name, so targets naming them are ambiguous.
    DuplicateStates(Vec<String>),
    /// Transitions reference state names that do not exist, as `state[index] -> target`.
    UndefinedTargets(Vec<String>),
    /// States with more than one transition on the same symbol, as `state on 'symbol'`.
    NonDeterministic(Vec<String>),
    /// Non-halting states that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
}

impl From<AnalysisError> for MachineError {
    /// Converts an `AnalysisError` into a `MachineError::Configuration`.
    fn from(error: AnalysisError) -> Self {
        let message = match error {
            AnalysisError::InvalidStartState(count) => {
                format!("machine must have exactly one start state, found {}", count)
            }
            AnalysisError::DuplicateStates(names) => {
                format!("Duplicate state names: {:?}", names)
            }
            AnalysisError::UndefinedTargets(transitions) => {
                format!("Transitions reference undefined states: {:?}", transitions)
            }
            AnalysisError::NonDeterministic(entries) => {
                format!("Multiple transitions on the same symbol: {:?}", entries)
            }
            AnalysisError::UnreachableStates(states) => {
                format!("Unreachable states detected: {:?}", states)
            }
        };
        MachineError::Configuration(message)
    }
}

/// Analyzes a state set for structural and logical errors.
///
/// Checks run in a fixed order and the first failure is returned.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError::Configuration)` describing the first problem otherwise.
pub fn analyze(states: &[State]) -> Result<(), MachineError> {
    let checks: [fn(&[State]) -> Result<(), AnalysisError>; 5] = [
        check_start_state,
        check_duplicate_states,
        check_undefined_targets,
        check_deterministic,
        check_unreachable_states,
    ];

    checks
        .iter()
        .try_for_each(|check| check(states))
        .map_err(MachineError::from)
}

fn check_start_state(states: &[State]) -> Result<(), AnalysisError> {
    let count = states
        .iter()
        .filter(|s| s.kind() == StateKind::Start)
        .count();

    if count != 1 {
        return Err(AnalysisError::InvalidStartState(count));
    }

    Ok(())
}

fn check_duplicate_states(states: &[State]) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = states
        .iter()
        .filter(|s| !seen.insert(s.name()))
        .map(|s| s.name().to_string())
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        return Err(AnalysisError::DuplicateStates(duplicates));
    }

    Ok(())
}

/// Checks that every transition target names a defined state.
fn check_undefined_targets(states: &[State]) -> Result<(), AnalysisError> {
    let defined: HashSet<&str> = states.iter().map(State::name).collect();

    let undefined: Vec<String> = states
        .iter()
        .flat_map(|state| {
            state
                .transitions()
                .iter()
                .enumerate()
                .filter(|(_, t)| !defined.contains(t.target.as_str()))
                .map(move |(i, t)| format!("{}[{}] -> {}", state.name(), i, t.target))
        })
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedTargets(undefined));
    }

    Ok(())
}

fn check_deterministic(states: &[State]) -> Result<(), AnalysisError> {
    let mut conflicts = Vec::new();

    for state in states {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for transition in state.transitions() {
            *counts.entry(transition.symbol).or_default() += 1;
        }

        let mut symbols: Vec<char> = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(symbol, _)| symbol)
            .collect();
        symbols.sort();

        conflicts.extend(
            symbols
                .into_iter()
                .map(|symbol| format!("{} on '{}'", state.name(), symbol)),
        );
    }

    if !conflicts.is_empty() {
        return Err(AnalysisError::NonDeterministic(conflicts));
    }

    Ok(())
}

/// Walks the transition graph from the start state.
///
/// Halting states are exempt: a machine must declare a rejecting state even when
/// none of its transitions lead there.
fn check_unreachable_states(states: &[State]) -> Result<(), AnalysisError> {
    let Some(start) = states.iter().find(|s| s.kind() == StateKind::Start) else {
        return Ok(());
    };

    let by_name: HashMap<&str, &State> = states.iter().map(|s| (s.name(), s)).collect();
    let mut visited = HashSet::new();
    let mut queue = vec![start.name()];

    while let Some(name) = queue.pop() {
        if !visited.insert(name) {
            continue;
        }

        if let Some(state) = by_name.get(name) {
            for transition in state.transitions() {
                if !visited.contains(transition.target.as_str()) {
                    queue.push(transition.target.as_str());
                }
            }
        }
    }

    let mut unreachable: Vec<String> = states
        .iter()
        .filter(|s| !s.kind().is_halting() && !visited.contains(s.name()))
        .map(|s| s.name().to_string())
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort();
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}
