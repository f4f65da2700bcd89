//! This module provides advisory checks over a `Program`. None of them prevent a program from
//! running: a missing rule is how a machine halts. They point at configurations that are often
//! mistakes, such as a start state without rules or states that can never be entered.

use crate::program::Program;
use crate::types::Symbol;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Represents the findings of an analysis.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalysisWarning {
    /// The start state has no rules, so the machine halts before its first step.
    #[error("Start state '{0}' has no rules; the machine halts immediately")]
    StartStateWithoutRules(String),
    /// States with rules that cannot be reached from the start state.
    #[error("Unreachable states: {0:?}")]
    UnreachableStates(Vec<String>),
    /// States entered by some rule that have no rules of their own. Entering one halts.
    #[error("Halting states (no rules defined): {0:?}")]
    HaltingStates(Vec<String>),
    /// Symbols on the initial tape that no rule reads.
    #[error("Initial tape contains symbols no rule reads: {0:?}")]
    UnreadTapeSymbols(Vec<Symbol>),
}

/// Analyzes a `Program` and returns every warning found, in a fixed order.
pub fn analyze(program: &Program) -> Vec<AnalysisWarning> {
    [
        check_start_state,
        check_unreachable_states,
        check_halting_states,
        check_tape_symbols,
    ]
    .iter()
    .filter_map(|f| f(program))
    .collect()
}

fn check_start_state(program: &Program) -> Option<AnalysisWarning> {
    (!program.rules.contains_state(&program.initial_state))
        .then(|| AnalysisWarning::StartStateWithoutRules(program.initial_state.clone()))
}

/// Walks the rules from the start state and reports defined states never visited.
fn check_unreachable_states(program: &Program) -> Option<AnalysisWarning> {
    let mut visited = HashSet::new();
    let mut queue = vec![program.initial_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        if let Some(rules) = program.rules.rules_for(state) {
            queue.extend(
                rules
                    .values()
                    .map(|rule| rule.next_state.as_str())
                    .filter(|next| !visited.contains(next)),
            );
        }
    }

    let unreachable: BTreeSet<String> = program
        .rules
        .states()
        .filter(|state| !visited.contains(state))
        .map(str::to_string)
        .collect();

    (!unreachable.is_empty())
        .then(|| AnalysisWarning::UnreachableStates(unreachable.into_iter().collect()))
}

fn check_halting_states(program: &Program) -> Option<AnalysisWarning> {
    let halting: BTreeSet<String> = program
        .rules
        .iter()
        .map(|(_, _, rule)| rule.next_state.as_str())
        .filter(|next| !program.rules.contains_state(next))
        .map(str::to_string)
        .collect();

    (!halting.is_empty()).then(|| AnalysisWarning::HaltingStates(halting.into_iter().collect()))
}

fn check_tape_symbols(program: &Program) -> Option<AnalysisWarning> {
    let read: HashSet<Symbol> = program.rules.iter().map(|(_, read, _)| read).collect();

    let unread: BTreeSet<Symbol> = program
        .tape
        .chars()
        .filter(|c| *c != program.blank && !read.contains(c))
        .collect();

    (!unread.is_empty()).then(|| AnalysisWarning::UnreadTapeSymbols(unread.into_iter().collect()))
}
