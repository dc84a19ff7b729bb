//! This crate provides a deterministic Turing Machine simulator.
//! It includes the state and transition model, the execution engine with its halting
//! policy, an optional static analyzer, and a handful of built-in example machines.

pub mod analyzer;
pub mod machine;
pub mod programs;
pub mod report;
pub mod state;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `Machine` struct and its option types from the machine module.
pub use machine::{Machine, MachineOptions, RunOptions};
/// Re-exports `Program`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the configuration formatter from the report module.
pub use report::{render_tape, Configuration};
/// Re-exports `State` and `Transition` from the state module.
pub use state::{State, Transition};
/// Re-exports the shared value and error types from the types module.
pub use types::{
    Direction, MachineError, Outcome, StateKind, DEFAULT_EMPTY_SYMBOL, DEFAULT_MAX_STEPS,
};
