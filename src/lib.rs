//! This crate provides the core logic for a deterministic single-tape automaton interpreter.
//! It includes the tape, the transition table, the execution engine with its bounded run loop,
//! and helpers for loading, analyzing, and shipping programs described as JSON.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod program;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the engine and its observation types from the machine module.
pub use machine::{NoopObserver, Observer, Snapshot, TuringMachine};
/// Re-exports the `Program` struct from the program module.
pub use program::Program;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Direction, Rule, RunResult, State, Step, StepBudget, Symbol, TapeMachineError, Transition,
    DEFAULT_BLANK_SYMBOL, DEFAULT_STEP_BUDGET, MAX_PROGRAM_SIZE,
};
