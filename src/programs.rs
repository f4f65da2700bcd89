//! Built-in programs shipped with the crate.
//!
//! The program files under `programs/` are embedded at compile time and decoded once on first
//! use. The registry is read-only.

use crate::program::Program;
use crate::types::TapeMachineError;
use tracing::error;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/zero-fill.json"),
    include_str!("../programs/binary-increment.json"),
    include_str!("../programs/busy-beaver-2.json"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .enumerate()
        .filter_map(|(index, text)| match Program::from_json(text) {
            Ok(program) => Some(program),
            Err(e) => {
                error!(index, error = %e, "failed to decode built-in program");
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<&'static Program, TapeMachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            TapeMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<&'static Program, TapeMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                TapeMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TapeMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.clone(),
            initial_tape: program.tape.clone(),
            state_count: program.rules.state_count(),
            rule_count: program.rules.len(),
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

    /// Get the original text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TapeMachineError> {
        PROGRAM_TEXTS.get(index).copied().ok_or_else(|| {
            TapeMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub rule_count: usize,
}
