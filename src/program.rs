//! This module defines `Program`, a self-contained description of a machine: its rules, start
//! state, blank symbol, and initial tape, as stored in JSON program files.

use crate::table::TransitionTable;
use crate::types::{State, Symbol, TapeMachineError, DEFAULT_BLANK_SYMBOL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    /// The name of the program.
    pub name: String,
    /// The state the machine starts in.
    pub initial_state: State,
    /// The symbol read from cells that were never written.
    #[serde(default = "default_blank")]
    pub blank: Symbol,
    /// The initial tape contents, one symbol per character.
    #[serde(default)]
    pub tape: String,
    /// The transition table.
    pub rules: TransitionTable,
}

fn default_blank() -> Symbol {
    DEFAULT_BLANK_SYMBOL
}

impl Program {
    /// Decodes a program from JSON, validating its transition table.
    pub fn from_json(json: &str) -> Result<Self, TapeMachineError> {
        let program: Program = serde_json::from_str(json)?;
        program.validate()?;
        Ok(program)
    }

    /// Encodes the program as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TapeMachineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the fields the table itself cannot check.
    pub fn validate(&self) -> Result<(), TapeMachineError> {
        if self.name.trim().is_empty() {
            return Err(TapeMachineError::ValidationError(
                "Program name must not be empty".to_string(),
            ));
        }
        if self.initial_state.is_empty() {
            return Err(TapeMachineError::InvalidState(self.initial_state.clone()));
        }

        Ok(())
    }
}
