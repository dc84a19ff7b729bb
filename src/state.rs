//! States and the transitions attached to them.
//!
//! Transitions refer to their destination by name. The name is only resolved when
//! the machine takes the transition, so states may be declared in any order.

use crate::types::{Direction, StateKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transition rule owned by its source state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol under the head that triggers this transition.
    pub symbol: char,
    /// Name of the state the machine moves to.
    pub target: String,
    /// The symbol written over the current cell.
    pub write: char,
    /// Where the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(symbol: char, target: impl Into<String>, write: char, direction: Direction) -> Self {
        Self {
            symbol,
            target: target.into(),
            write,
            direction,
        }
    }
}

/// A named state with its kind and ordered outgoing transitions.
///
/// Name uniqueness within a machine is the caller's responsibility; see
/// [`crate::analyzer::analyze`] for an optional check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    name: String,
    kind: StateKind,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transitions: Vec::new(),
        }
    }

    /// Creates a state of kind `StateKind::Normal`.
    pub fn normal(name: impl Into<String>) -> Self {
        Self::new(name, StateKind::Normal)
    }

    /// Appends a transition and returns the state, for chained construction.
    ///
    /// No validation happens here; the target is looked up when the transition fires.
    ///
    /// ```
    /// use tmsim::{Direction, State, StateKind};
    ///
    /// let start = State::new("start", StateKind::Start)
    ///     .add_transition('a', "start", 'a', Direction::Right)
    ///     .add_transition('_', "accept", '_', Direction::Right);
    /// assert_eq!(start.transitions().len(), 2);
    /// ```
    pub fn add_transition(
        mut self,
        symbol: char,
        target: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> Self {
        self.push_transition(symbol, target, write, direction);
        self
    }

    /// In-place variant of [`State::add_transition`].
    pub fn push_transition(
        &mut self,
        symbol: char,
        target: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> &mut Self {
        self.transitions
            .push(Transition::new(symbol, target, write, direction));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns every transition triggered by `symbol`, in insertion order.
    pub fn transitions_on(&self, symbol: char) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.symbol == symbol)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
