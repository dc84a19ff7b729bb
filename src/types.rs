//! This module defines the value types shared across the simulator: head movement
//! directions, state kinds, run outcomes and the error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The default symbol used for tape cells that have never been written.
pub const DEFAULT_EMPTY_SYMBOL: char = '_';
/// The default number of loop iterations `Machine::run` performs before giving up.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "LEFT"),
            Direction::Right => write!(f, "RIGHT"),
        }
    }
}

/// Classifies the role a state plays in the halting policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// The single state execution begins in.
    Start,
    /// Reaching this state halts the run with `Outcome::Accepted`.
    Accepting,
    /// Reaching this state halts the run with `Outcome::Rejected`.
    Rejecting,
    /// An ordinary intermediate state.
    #[default]
    Normal,
}

impl StateKind {
    /// Returns `true` for kinds that end a run when reached.
    pub fn is_halting(self) -> bool {
        matches!(self, StateKind::Accepting | StateKind::Rejecting)
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Start => "START",
            StateKind::Accepting => "ACCEPTING",
            StateKind::Rejecting => "REJECTING",
            StateKind::Normal => "NORMAL",
        };
        f.write_str(name)
    }
}

/// The result of running a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine reached an accepting state.
    Accepted,
    /// The machine reached a rejecting state, or was implicitly rejected.
    Rejected,
    /// The step budget ran out before the machine halted.
    StepLimitExceeded,
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        self == Outcome::Accepted
    }

    /// Returns `true` when the machine actually halted, either way.
    pub fn is_halted(self) -> bool {
        self != Outcome::StepLimitExceeded
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => write!(f, "accepted"),
            Outcome::Rejected => write!(f, "rejected"),
            Outcome::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

/// Represents the errors that can occur while building or running a machine.
///
/// All of them are fatal for the current run; steps executed before the error
/// stay applied to the tape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The state set handed to `Machine::new` violates a structural requirement.
    #[error("Invalid machine configuration: {0}")]
    Configuration(String),
    /// The current state has zero or several transitions for the symbol under the head.
    #[error(
        "No deterministic transition found in state '{state}' for symbol '{symbol}' ({matches} candidates)"
    )]
    NonDeterministicTransition {
        state: String,
        symbol: char,
        matches: usize,
    },
    /// A transition names a target that resolves to zero or several states.
    #[error(
        "Transition from state '{state}' targets a non-existent or ambiguous state '{target}' ({matches} matches)"
    )]
    DanglingTransition {
        state: String,
        target: String,
        matches: usize,
    },
    /// The machine has no current state although implicit reject is disabled.
    #[error("Machine has no current state: missing transition; deterministic machines must always have one")]
    InconsistentMachine,
}

impl MachineError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        MachineError::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Left.to_string(), "LEFT");
        assert_eq!(Direction::Right.to_string(), "RIGHT");
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::Right).unwrap();
        assert_eq!(json, "\"Right\"");

        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Right);
    }

    #[test]
    fn test_state_kind_display_and_default() {
        assert_eq!(StateKind::Accepting.to_string(), "ACCEPTING");
        assert_eq!(StateKind::Rejecting.to_string(), "REJECTING");
        assert_eq!(StateKind::default(), StateKind::Normal);
    }

    #[test]
    fn test_state_kind_is_halting() {
        assert!(StateKind::Accepting.is_halting());
        assert!(StateKind::Rejecting.is_halting());
        assert!(!StateKind::Start.is_halting());
        assert!(!StateKind::Normal.is_halting());
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(Outcome::Accepted.is_accepted());
        assert!(!Outcome::Rejected.is_accepted());
        assert!(Outcome::Rejected.is_halted());
        assert!(!Outcome::StepLimitExceeded.is_halted());
        assert_eq!(Outcome::StepLimitExceeded.to_string(), "step limit exceeded");
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::DanglingTransition {
            state: "q0".to_string(),
            target: "X".to_string(),
            matches: 0,
        };

        let message = error.to_string();
        assert!(message.contains("non-existent or ambiguous state"));
        assert!(message.contains("'X'"));
    }
}
