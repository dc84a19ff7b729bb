//! A small library of ready-made machines, used by the CLI and handy in tests.

use crate::machine::{Machine, MachineOptions};
use crate::state::State;
use crate::types::{Direction, MachineError, StateKind};
use serde::Serialize;

use Direction::{Left, Right};

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        ab_then_as(),
        even_length(),
        binary_increment(),
        zeros_then_ones(),
    ];
}

/// A named machine definition that can be instantiated on any input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub states: Vec<State>,
    pub options: MachineOptions,
    /// An input the program is known to accept.
    pub sample_input: String,
}

impl Program {
    /// Builds a fresh machine whose tape holds the characters of `input`.
    pub fn machine(&self, input: &str) -> Result<Machine, MachineError> {
        Machine::new(self.states.clone(), input.chars().collect(), self.options)
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions().len()).sum()
    }
}

/// Summary information about a built-in program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub state_count: usize,
    pub transition_count: usize,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<&'static Program, MachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            MachineError::Configuration(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<&'static Program, MachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .ok_or_else(|| MachineError::Configuration(format!("Program '{}' not found", name)))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    pub fn get_program_info(index: usize) -> Result<ProgramInfo, MachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            description: program.description.clone(),
            state_count: program.states.len(),
            transition_count: program.transition_count(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

fn implicit_reject() -> MachineOptions {
    MachineOptions {
        implicit_reject: true,
        ..MachineOptions::default()
    }
}

/// Accepts an `a`, then a `b`, then any number of `a`.
fn ab_then_as() -> Program {
    Program {
        name: "ab-then-as".to_string(),
        description: "Accepts 'a', then 'b', then any number of 'a'".to_string(),
        states: vec![
            State::new("start", StateKind::Start).add_transition('a', "one_a", 'a', Right),
            State::normal("one_a").add_transition('b', "one_b", 'b', Right),
            State::normal("one_b")
                .add_transition('a', "one_b", 'a', Right)
                .add_transition('_', "accept", '_', Right),
            State::new("accept", StateKind::Accepting),
        ],
        options: implicit_reject(),
        sample_input: "aba".to_string(),
    }
}

/// Accepts binary strings of even length, with an explicit rejecting state.
fn even_length() -> Program {
    Program {
        name: "even-length".to_string(),
        description: "Accepts binary strings of even length".to_string(),
        states: vec![
            State::new("even", StateKind::Start)
                .add_transition('0', "odd", '0', Right)
                .add_transition('1', "odd", '1', Right)
                .add_transition('_', "accept", '_', Right),
            State::normal("odd")
                .add_transition('0', "even", '0', Right)
                .add_transition('1', "even", '1', Right)
                .add_transition('_', "reject", '_', Right),
            State::new("accept", StateKind::Accepting),
            State::new("reject", StateKind::Rejecting),
        ],
        options: MachineOptions::default(),
        sample_input: "0110".to_string(),
    }
}

/// Adds one to a binary number, growing the tape to the left on overflow.
fn binary_increment() -> Program {
    Program {
        name: "binary-increment".to_string(),
        description: "Adds one to a binary number".to_string(),
        states: vec![
            State::new("scan", StateKind::Start)
                .add_transition('0', "scan", '0', Right)
                .add_transition('1', "scan", '1', Right)
                .add_transition('_', "carry", '_', Left),
            State::normal("carry")
                .add_transition('1', "carry", '0', Left)
                .add_transition('0', "done", '1', Left)
                .add_transition('_', "done", '1', Left),
            State::new("done", StateKind::Accepting),
        ],
        options: implicit_reject(),
        sample_input: "1011".to_string(),
    }
}

/// Accepts `0^n 1^n` by repeatedly crossing off an outer `0` and its matching `1`.
fn zeros_then_ones() -> Program {
    Program {
        name: "zeros-then-ones".to_string(),
        description: "Accepts n zeros followed by n ones".to_string(),
        states: vec![
            State::new("mark_zero", StateKind::Start)
                .add_transition('0', "find_one", 'X', Right)
                .add_transition('Y', "check_rest", 'Y', Right)
                .add_transition('_', "accept", '_', Right),
            State::normal("find_one")
                .add_transition('0', "find_one", '0', Right)
                .add_transition('Y', "find_one", 'Y', Right)
                .add_transition('1', "rewind", 'Y', Left),
            State::normal("rewind")
                .add_transition('0', "rewind", '0', Left)
                .add_transition('Y', "rewind", 'Y', Left)
                .add_transition('X', "mark_zero", 'X', Right),
            State::normal("check_rest")
                .add_transition('Y', "check_rest", 'Y', Right)
                .add_transition('_', "accept", '_', Right),
            State::new("accept", StateKind::Accepting),
        ],
        options: implicit_reject(),
        sample_input: "0011".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::types::Outcome;

    fn run(name: &str, input: &str) -> (Outcome, Machine) {
        let program = ProgramManager::get_program_by_name(name).unwrap();
        let mut machine = program.machine(input).unwrap();
        let outcome = machine.run().unwrap();
        (outcome, machine)
    }

    #[test]
    fn test_all_programs_pass_analysis() {
        for program in PROGRAMS.iter() {
            assert!(
                analyze(&program.states).is_ok(),
                "{} failed analysis",
                program.name
            );
        }
    }

    #[test]
    fn test_all_programs_accept_their_sample_input() {
        for program in PROGRAMS.iter() {
            let mut machine = program.machine(&program.sample_input).unwrap();
            assert_eq!(
                machine.run().unwrap(),
                Outcome::Accepted,
                "{} did not accept {}",
                program.name,
                program.sample_input
            );
        }
    }

    #[test]
    fn test_ab_then_as() {
        assert_eq!(run("ab-then-as", "ab").0, Outcome::Accepted);
        assert_eq!(run("ab-then-as", "abaaa").0, Outcome::Accepted);
        assert_eq!(run("ab-then-as", "abb").0, Outcome::Rejected);
        assert_eq!(run("ab-then-as", "").0, Outcome::Rejected);
    }

    #[test]
    fn test_even_length() {
        assert_eq!(run("even-length", "").0, Outcome::Accepted);
        assert_eq!(run("even-length", "01").0, Outcome::Accepted);
        assert_eq!(run("even-length", "011").0, Outcome::Rejected);
    }

    #[test]
    fn test_binary_increment() {
        let (outcome, machine) = run("binary-increment", "1011");
        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(machine.tape(), &['1', '1', '0', '0', '_']);

        let (outcome, machine) = run("binary-increment", "11");
        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(machine.tape(), &['_', '1', '0', '0', '_']);
        assert_eq!(machine.head_position(), 0);
    }

    #[test]
    fn test_zeros_then_ones() {
        assert_eq!(run("zeros-then-ones", "").0, Outcome::Accepted);
        assert_eq!(run("zeros-then-ones", "000111").0, Outcome::Accepted);
        assert_eq!(run("zeros-then-ones", "011").0, Outcome::Rejected);
        assert_eq!(run("zeros-then-ones", "001").0, Outcome::Rejected);
        assert_eq!(run("zeros-then-ones", "10").0, Outcome::Rejected);
    }

    #[test]
    fn test_program_manager_lookup() {
        assert_eq!(ProgramManager::get_program_count(), 4);
        assert_eq!(
            ProgramManager::list_program_names(),
            vec!["ab-then-as", "even-length", "binary-increment", "zeros-then-ones"]
        );
        assert!(ProgramManager::get_program_by_name("missing").is_err());
        assert!(ProgramManager::get_program_by_index(99).is_err());

        let info = ProgramManager::get_program_info(0).unwrap();
        assert_eq!(info.name, "ab-then-as");
        assert_eq!(info.state_count, 4);
        assert_eq!(info.transition_count, 4);
    }

    #[test]
    fn test_search_programs() {
        assert_eq!(ProgramManager::search_programs("ONES"), vec![3]);
        assert_eq!(ProgramManager::search_programs("e").len(), 4);
        assert!(ProgramManager::search_programs("nothing").is_empty());
    }
}
