//! This module defines the `TransitionTable`, the read-only mapping from
//! (state, symbol) to `Rule` that drives a machine.
//!
//! Tables are validated when they are built. A table that deserializes successfully can be
//! handed to any number of machines without further checks.

use crate::types::{Direction, Rule, State, Symbol, TapeMachineError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The serialized form of a table: `{ state: { symbol: [write, direction, next_state] } }`.
pub type RawTable = BTreeMap<String, BTreeMap<String, (String, String, String)>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct TransitionTable {
    rules: HashMap<State, HashMap<Symbol, Rule>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes and validates a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, TapeMachineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a rule for `(state, read)`, replacing any previous rule for that pair.
    ///
    /// # Errors
    ///
    /// Returns `TapeMachineError::InvalidState` if `state` or the rule's next state is empty.
    pub fn insert(
        &mut self,
        state: impl Into<State>,
        read: Symbol,
        rule: Rule,
    ) -> Result<(), TapeMachineError> {
        let state = state.into();
        if state.is_empty() {
            return Err(TapeMachineError::InvalidState(state));
        }
        if rule.next_state.is_empty() {
            return Err(TapeMachineError::InvalidState(rule.next_state));
        }

        self.rules.entry(state).or_default().insert(read, rule);
        Ok(())
    }

    /// Chainable form of [`TransitionTable::insert`].
    pub fn with_rule(
        mut self,
        state: impl Into<State>,
        read: Symbol,
        rule: Rule,
    ) -> Result<Self, TapeMachineError> {
        self.insert(state, read, rule)?;
        Ok(self)
    }

    /// Looks up the rule for `(state, symbol)`. `None` means the machine halts.
    pub fn get(&self, state: &str, symbol: Symbol) -> Option<&Rule> {
        self.rules.get(state)?.get(&symbol)
    }

    /// Returns the rules defined for `state`, keyed by the symbol they read.
    pub fn rules_for(&self, state: &str) -> Option<&HashMap<Symbol, Rule>> {
        self.rules.get(state)
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.rules.contains_key(state)
    }

    /// Iterates over the states that have at least one entry.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Iterates over every `(state, read, rule)` entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol, &Rule)> {
        self.rules.iter().flat_map(|(state, by_symbol)| {
            by_symbol
                .iter()
                .map(move |(&read, rule)| (state.as_str(), read, rule))
        })
    }

    pub fn state_count(&self) -> usize {
        self.rules.len()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a single-character symbol field.
fn parse_symbol(
    value: &str,
    state: &str,
    symbol: &str,
    field: &str,
) -> Result<Symbol, TapeMachineError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TapeMachineError::InvalidTable {
            state: state.to_string(),
            symbol: symbol.to_string(),
            reason: format!("{} '{}' must be exactly one character", field, value),
        }),
    }
}

impl TryFrom<RawTable> for TransitionTable {
    type Error = TapeMachineError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = TransitionTable::new();

        for (state, by_symbol) in raw {
            if state.is_empty() {
                return Err(TapeMachineError::InvalidState(state));
            }

            for (symbol, (write, direction, next_state)) in by_symbol {
                let read = parse_symbol(&symbol, &state, &symbol, "read symbol")?;
                let write = parse_symbol(&write, &state, &symbol, "write symbol")?;
                let direction: Direction =
                    direction.parse().map_err(|reason| TapeMachineError::InvalidTable {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        reason,
                    })?;
                if next_state.is_empty() {
                    return Err(TapeMachineError::InvalidTable {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        reason: "next state must not be empty".to_string(),
                    });
                }

                table.insert(state.clone(), read, Rule::new(write, direction, next_state))?;
            }
        }

        Ok(table)
    }
}

impl From<TransitionTable> for RawTable {
    fn from(table: TransitionTable) -> Self {
        table
            .rules
            .into_iter()
            .map(|(state, by_symbol)| {
                let entries = by_symbol
                    .into_iter()
                    .map(|(read, rule)| {
                        (
                            read.to_string(),
                            (
                                rule.write.to_string(),
                                rule.direction.as_str().to_string(),
                                rule.next_state,
                            ),
                        )
                    })
                    .collect();
                (state, entries)
            })
            .collect()
    }
}
