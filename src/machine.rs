//! This module defines the `Machine` struct, which executes a deterministic single-tape
//! Turing Machine. It owns the state set, the tape and the head, applies transitions one
//! at a time, and decides when a run halts.

use crate::report::Configuration;
use crate::state::State;
use crate::types::{
    Direction, MachineError, Outcome, StateKind, DEFAULT_EMPTY_SYMBOL, DEFAULT_MAX_STEPS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Construction-time settings for a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineOptions {
    /// Symbol used for cells added when the tape grows.
    pub empty_symbol: char,
    /// Treat a missing transition as a rejection instead of an error.
    pub implicit_reject: bool,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            empty_symbol: DEFAULT_EMPTY_SYMBOL,
            implicit_reject: false,
        }
    }
}

/// Settings for a single call to [`Machine::run_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Upper bound on loop iterations.
    pub max_steps: usize,
    /// Emit the configuration before every halting check as a `tracing` event.
    pub trace: bool,
    /// Emit a progress event every tenth of the step budget.
    pub show_progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            trace: false,
            show_progress: false,
        }
    }
}

/// A deterministic single-tape Turing Machine.
///
/// The machine takes ownership of both the states and the tape. States are frozen
/// once the machine is built; a name index is computed at construction but
/// transition targets are still resolved, and may still fail, when a transition fires.
///
/// There is no reset: running a machine that already halted observes the same
/// halting state again and returns immediately.
#[derive(Debug, Clone)]
pub struct Machine {
    states: Vec<State>,
    index: HashMap<String, Vec<usize>>,
    tape: Vec<char>,
    head: usize,
    empty_symbol: char,
    implicit_reject: bool,
    current: Option<usize>,
    step_count: usize,
}

impl Machine {
    /// Creates a new machine from its states and initial tape.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Configuration` when, checked in this order:
    /// * there is not exactly one `Start` state,
    /// * there is no `Accepting` state,
    /// * there is no `Rejecting` state and implicit reject is disabled.
    pub fn new(
        states: Vec<State>,
        tape: Vec<char>,
        options: MachineOptions,
    ) -> Result<Self, MachineError> {
        let count = |kind: StateKind| states.iter().filter(|s| s.kind() == kind).count();

        let starts = count(StateKind::Start);
        if starts != 1 {
            return Err(MachineError::configuration(format!(
                "machine must have exactly one start state, found {starts}"
            )));
        }
        if count(StateKind::Accepting) == 0 {
            return Err(MachineError::configuration(
                "machine must have at least one accepting state",
            ));
        }
        if !options.implicit_reject && count(StateKind::Rejecting) == 0 {
            return Err(MachineError::configuration(
                "machine must have at least one rejecting state",
            ));
        }

        let start = states
            .iter()
            .position(|s| s.kind() == StateKind::Start)
            .ok_or_else(|| MachineError::configuration("machine must have exactly one start state"))?;

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, state) in states.iter().enumerate() {
            index.entry(state.name().to_string()).or_default().push(i);
        }

        debug!(
            states = states.len(),
            tape_len = tape.len(),
            implicit_reject = options.implicit_reject,
            "machine constructed"
        );

        Ok(Self {
            states,
            index,
            tape,
            head: 0,
            empty_symbol: options.empty_symbol,
            implicit_reject: options.implicit_reject,
            current: Some(start),
            step_count: 0,
        })
    }

    /// Creates a machine with the default empty symbol and implicit reject disabled.
    pub fn with_defaults(states: Vec<State>, tape: Vec<char>) -> Result<Self, MachineError> {
        Self::new(states, tape, MachineOptions::default())
    }

    /// Executes a single read-write-move cycle.
    ///
    /// The tape grows by one empty cell on the right when the head sits past its end,
    /// and by one empty cell on the left when the head moves left from position 0
    /// (the head then stays at 0, over the new cell).
    ///
    /// With implicit reject enabled, a symbol without any matching transition clears
    /// the current state and returns `Ok(())` instead of failing; the next `run`
    /// iteration reports the rejection. Only in that mode does a zero-match step
    /// succeed: otherwise any match count other than one is an error.
    ///
    /// # Errors
    ///
    /// * `NonDeterministicTransition` when several transitions match the symbol under
    ///   the head, or when none does and implicit reject is disabled.
    /// * `DanglingTransition` when the chosen transition's target resolves to zero or
    ///   several states. The symbol has already been written at that point.
    /// * `InconsistentMachine` when there is no current state.
    pub fn step(&mut self) -> Result<(), MachineError> {
        let current = self.current.ok_or(MachineError::InconsistentMachine)?;

        if self.head >= self.tape.len() {
            self.tape.push(self.empty_symbol);
        }

        let symbol = self.tape[self.head];
        let state = &self.states[current];
        let mut candidates = state.transitions_on(symbol);
        let transition = match (candidates.next(), candidates.next()) {
            (Some(t), None) => t.clone(),
            (None, _) if self.implicit_reject => {
                debug!(state = state.name(), %symbol, "no transition, implicit reject");
                self.current = None;
                return Ok(());
            }
            _ => {
                return Err(MachineError::NonDeterministicTransition {
                    state: state.name().to_string(),
                    symbol,
                    matches: state.transitions_on(symbol).count(),
                });
            }
        };

        self.tape[self.head] = transition.write;

        let next = self.resolve(current, &transition.target)?;
        self.current = Some(next);

        match transition.direction {
            Direction::Left if self.head == 0 => {
                self.tape.insert(0, self.empty_symbol);
            }
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
        }

        self.step_count += 1;
        debug!(
            step = self.step_count,
            read = %symbol,
            write = %transition.write,
            direction = %transition.direction,
            next = %transition.target,
            head = self.head,
            "step"
        );

        Ok(())
    }

    /// Runs with the default step budget and no tracing.
    pub fn run(&mut self) -> Result<Outcome, MachineError> {
        self.run_with(&RunOptions::default())
    }

    /// Runs until the machine halts or `options.max_steps` iterations have passed.
    ///
    /// Each iteration emits the trace (if enabled), then checks the halting policy,
    /// then steps.
    pub fn run_with(&mut self, options: &RunOptions) -> Result<Outcome, MachineError> {
        let trace = options.trace;
        self.execute(options.max_steps, options.show_progress, &mut |config| {
            if trace {
                info!(target: "tmsim::trace", "{config}");
            }
        })
    }

    /// Runs like [`Machine::run_with`], also handing every configuration to
    /// `on_config` before the halting check.
    pub fn run_traced<F>(
        &mut self,
        options: &RunOptions,
        mut on_config: F,
    ) -> Result<Outcome, MachineError>
    where
        F: FnMut(&Configuration<'_>),
    {
        let trace = options.trace;
        self.execute(options.max_steps, options.show_progress, &mut |config| {
            if trace {
                info!(target: "tmsim::trace", "{config}");
            }
            on_config(config);
        })
    }

    fn execute(
        &mut self,
        max_steps: usize,
        show_progress: bool,
        on_config: &mut dyn FnMut(&Configuration<'_>),
    ) -> Result<Outcome, MachineError> {
        let interval = (max_steps / 10).max(1);

        for iteration in 0..max_steps {
            on_config(&self.configuration());

            if show_progress && iteration % interval == 0 {
                info!(
                    target: "tmsim::progress",
                    iteration,
                    max_steps,
                    "running Turing Machine for at most {max_steps} steps"
                );
            }

            let Some(current) = self.current else {
                if !self.implicit_reject {
                    return Err(MachineError::InconsistentMachine);
                }
                info!(steps = self.step_count, "implicitly rejected");
                return Ok(Outcome::Rejected);
            };

            match self.states[current].kind() {
                StateKind::Accepting => {
                    info!(steps = self.step_count, state = self.states[current].name(), "accepted");
                    return Ok(Outcome::Accepted);
                }
                StateKind::Rejecting => {
                    info!(steps = self.step_count, state = self.states[current].name(), "rejected");
                    return Ok(Outcome::Rejected);
                }
                StateKind::Start | StateKind::Normal => {}
            }

            self.step()?;
        }

        warn!(max_steps, steps = self.step_count, "step limit exceeded without halting");
        Ok(Outcome::StepLimitExceeded)
    }

    /// Looks up the single state called `target`.
    fn resolve(&self, from: usize, target: &str) -> Result<usize, MachineError> {
        match self.index.get(target).map(Vec::as_slice) {
            Some([only]) => Ok(*only),
            other => Err(MachineError::DanglingTransition {
                state: self.states[from].name().to_string(),
                target: target.to_string(),
                matches: other.map_or(0, <[usize]>::len),
            }),
        }
    }

    /// Returns the current tape contents.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Consumes the machine and hands back its tape.
    pub fn into_tape(self) -> Vec<char> {
        self.tape
    }

    pub fn head_position(&self) -> usize {
        self.head
    }

    /// Moves the head to `position`, which may be at most one past the end of the tape.
    pub fn set_head_position(&mut self, position: usize) -> Result<(), MachineError> {
        if position > self.tape.len() {
            return Err(MachineError::configuration(format!(
                "head position {position} is beyond the tape (length {})",
                self.tape.len()
            )));
        }
        self.head = position;
        Ok(())
    }

    /// Returns the current state, or `None` once the machine has been implicitly rejected.
    pub fn current_state(&self) -> Option<&State> {
        self.current.map(|i| &self.states[i])
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn empty_symbol(&self) -> char {
        self.empty_symbol
    }

    pub fn implicit_reject(&self) -> bool {
        self.implicit_reject
    }

    /// Checks whether a run would stop immediately.
    pub fn is_halted(&self) -> bool {
        self.current_state().is_none_or(|s| s.kind().is_halting())
    }

    /// Returns a snapshot of the tape, head and current state name.
    pub fn configuration(&self) -> Configuration<'_> {
        Configuration {
            tape: &self.tape,
            head_position: self.head,
            state: self.current_state().map(State::name),
        }
    }
}
