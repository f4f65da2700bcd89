//! This module defines the core data structures and types used throughout the tape machine
//! interpreter, including rules, directions, step outcomes, run results, and error types.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A symbol stored in a tape cell. Symbols are only compared and displayed.
pub type Symbol = char;

/// A control state label.
pub type State = String;

/// The default blank symbol used on the tape.
pub const DEFAULT_BLANK_SYMBOL: Symbol = '_';
/// The maximum allowed size for a serialized program in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The step budget used when the caller does not provide one.
pub const DEFAULT_STEP_BUDGET: usize = 100;

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Offset applied to the head position after a transition.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Short textual form used in serialized tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts `L`, `R`, `Left` and `Right`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" | "LEFT" => Ok(Direction::Left),
            "R" | "RIGHT" => Ok(Direction::Right),
            _ => Err(format!("unknown direction '{}'", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A single transition rule: what to write, where to move, and which state comes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The symbol written under the head.
    pub write: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine enters.
    pub next_state: State,
}

impl Rule {
    pub fn new(write: Symbol, direction: Direction, next_state: impl Into<State>) -> Self {
        Self {
            write,
            direction,
            next_state: next_state.into(),
        }
    }
}

/// A rule that has just been applied, together with where and what it read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Head position at which the symbol was read and written.
    pub position: i64,
    /// The symbol that selected the rule.
    pub read: Symbol,
    /// The rule that fired.
    pub rule: Rule,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a transition and can continue.
    Continue,
    /// No rule exists for the current state and symbol.
    Halt,
}

/// The maximum number of transitions a single run may execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StepBudget(usize);

impl StepBudget {
    pub const fn new(steps: usize) -> Self {
        Self(steps)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for StepBudget {
    fn from(steps: usize) -> Self {
        Self(steps)
    }
}

impl TryFrom<i64> for StepBudget {
    type Error = TapeMachineError;

    fn try_from(steps: i64) -> Result<Self, Self::Error> {
        usize::try_from(steps)
            .map(Self)
            .map_err(|_| TapeMachineError::NegativeStepBudget(steps))
    }
}

impl FromStr for StepBudget {
    type Err = TapeMachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps: i64 = s
            .trim()
            .parse()
            .map_err(|_| TapeMachineError::InvalidStepBudget(s.trim().to_string()))?;

        Self::try_from(steps)
    }
}

impl fmt::Display for StepBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of a bounded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Number of transitions applied during this run.
    pub steps_executed: usize,
    /// `true` when the run stopped because no rule applied, `false` when the budget ran out.
    pub halted_naturally: bool,
    /// The tape contents after the run, leftmost cell first.
    pub tape: Vec<Symbol>,
    /// The state the machine is in after the run.
    pub state: State,
    /// The head position after the run.
    pub head: i64,
}

impl RunResult {
    /// Returns the final tape as a `String`.
    pub fn tape_string(&self) -> String {
        self.tape.iter().collect()
    }
}

/// Represents various errors that can occur while building or driving a tape machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapeMachineError {
    /// A transition table entry is malformed.
    #[error("Invalid transition for state '{state}' and symbol '{symbol}': {reason}")]
    InvalidTable {
        state: String,
        symbol: String,
        reason: String,
    },
    /// A state label is unusable (for example empty).
    #[error("Invalid state: '{0}'")]
    InvalidState(String),
    /// A step budget could not be read as an integer.
    #[error("Invalid step budget: '{0}' is not an integer")]
    InvalidStepBudget(String),
    /// A step budget is negative.
    #[error("Invalid step budget: {0} is negative")]
    NegativeStepBudget(i64),
    /// A program document could not be decoded.
    #[error("Program parsing error: {0}")]
    ParseError(String),
    /// A program document is structurally unacceptable.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// A file system operation failed.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for TapeMachineError {
    fn from(error: serde_json::Error) -> Self {
        TapeMachineError::ParseError(error.to_string())
    }
}
