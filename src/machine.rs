//! This module defines the `TuringMachine` struct, which simulates a deterministic single-tape
//! automaton. It handles the machine's state, tape operations, head movements, and the bounded
//! execution of transition rules.

use crate::program::Program;
use crate::tape::Tape;
use crate::table::TransitionTable;
use crate::types::{
    Rule, RunResult, State, Step, Symbol, TapeMachineError, Transition,
};
use tracing::{debug, trace};

/// A read-only view of the machine handed to an [`Observer`] after every completed step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'m> {
    /// Number of steps completed so far in the current run (1-based).
    pub step: usize,
    /// The state the machine is now in.
    pub state: &'m str,
    /// The head position after the move.
    pub head: i64,
    /// The symbol now under the head.
    pub symbol: Symbol,
    /// The whole tape.
    pub tape: &'m Tape,
    /// The transition that was just applied.
    pub transition: &'m Transition,
}

/// Receives a [`Snapshot`] between steps of a run.
///
/// Observers are for tracing and pacing only. They cannot reach the machine's internals and
/// nothing they do changes the outcome of a run.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// An observer that ignores every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Represents a single-tape automaton.
///
/// The machine owns its tape and borrows its transition table, which stays untouched for the
/// whole lifetime of the machine.
#[derive(Debug, Clone)]
pub struct TuringMachine<'t> {
    table: &'t TransitionTable,
    state: State,
    tape: Tape,
    head: i64,
    step_count: usize,
    initial_state: State,
    initial_tape: Tape,
}

impl<'t> TuringMachine<'t> {
    /// Creates a new machine with the head at position 0.
    ///
    /// # Arguments
    ///
    /// * `table` - The transition table driving the machine.
    /// * `initial_state` - The state the machine starts in.
    /// * `input` - The initial tape contents, one symbol per character. May be empty.
    /// * `blank` - The symbol read from cells that were never written.
    ///
    /// # Errors
    ///
    /// Returns `TapeMachineError::InvalidState` if `initial_state` is empty.
    pub fn new(
        table: &'t TransitionTable,
        initial_state: impl Into<State>,
        input: &str,
        blank: Symbol,
    ) -> Result<Self, TapeMachineError> {
        let initial_state = initial_state.into();
        if initial_state.is_empty() {
            return Err(TapeMachineError::InvalidState(initial_state));
        }

        let tape = Tape::from_input(input, blank);

        Ok(Self {
            table,
            state: initial_state.clone(),
            tape: tape.clone(),
            head: 0,
            step_count: 0,
            initial_state,
            initial_tape: tape,
        })
    }

    /// Creates a new machine from a `Program`, using its rules, start state, tape, and blank.
    pub fn from_program(program: &'t Program) -> Result<Self, TapeMachineError> {
        Self::new(
            &program.rules,
            program.initial_state.as_str(),
            &program.tape,
            program.blank,
        )
    }

    /// Executes a single transition.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied.
    /// * `Step::Halt` if no rule exists for the current state and symbol. Nothing is mutated
    ///   in that case, so calling `step` again halts again.
    pub fn step(&mut self) -> Step {
        match self.apply() {
            Some(_) => Step::Continue,
            None => Step::Halt,
        }
    }

    /// Looks up and applies the rule for the current configuration.
    fn apply(&mut self) -> Option<Transition> {
        let read = self.symbol();
        let Some(rule) = self.table.get(&self.state, read) else {
            debug!(state = %self.state, symbol = %read, head = self.head, "no rule, halting");
            return None;
        };

        let position = self.head;
        self.tape.write(position, rule.write);
        self.head += rule.direction.offset();
        self.state.clone_from(&rule.next_state);
        self.step_count += 1;

        trace!(
            step = self.step_count,
            read = %read,
            write = %rule.write,
            direction = %rule.direction,
            state = %self.state,
            head = self.head,
            "applied transition"
        );

        Some(Transition {
            position,
            read,
            rule: rule.clone(),
        })
    }

    /// Runs the machine until it halts or `max_steps` transitions have been applied.
    ///
    /// Budgets coming from untrusted input go through [`StepBudget`](crate::types::StepBudget),
    /// which rejects negative values before anything runs.
    pub fn run(&mut self, max_steps: usize) -> RunResult {
        self.run_with(max_steps, &mut NoopObserver)
    }

    /// Runs the machine like [`TuringMachine::run`], calling `observer` after every applied
    /// transition.
    ///
    /// When the budget runs out the machine is only paused: another call continues from
    /// the retained configuration.
    pub fn run_with<O>(&mut self, max_steps: usize, observer: &mut O) -> RunResult
    where
        O: Observer + ?Sized,
    {
        let mut steps_executed = 0;
        let mut halted_naturally = false;

        debug!(max_steps, state = %self.state, head = self.head, "run started");

        while steps_executed < max_steps {
            let Some(transition) = self.apply() else {
                halted_naturally = true;
                break;
            };
            steps_executed += 1;

            observer.observe(&Snapshot {
                step: steps_executed,
                state: &self.state,
                head: self.head,
                symbol: self.symbol(),
                tape: &self.tape,
                transition: &transition,
            });
        }

        debug!(
            steps_executed,
            halted_naturally,
            state = %self.state,
            head = self.head,
            "run finished"
        );

        RunResult {
            steps_executed,
            halted_naturally,
            tape: self.tape.render().to_vec(),
            state: self.state.clone(),
            head: self.head,
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the state the machine started in.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns the current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the symbol under the head, blank if the cell was never written.
    pub fn symbol(&self) -> Symbol {
        self.tape.read(self.head)
    }

    /// Returns the blank symbol used by this machine.
    pub fn blank(&self) -> Symbol {
        self.tape.blank()
    }

    /// Returns the total number of transitions applied since creation or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the transition table driving this machine.
    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }

    /// Returns the rule that the next step would apply, if any.
    pub fn transition(&self) -> Option<&'t Rule> {
        self.table.get(&self.state, self.symbol())
    }

    /// Checks whether the next step would halt.
    pub fn is_halted(&self) -> bool {
        self.transition().is_none()
    }

    /// Resets the machine to its initial configuration.
    /// This includes the state, tape, head position, and step count.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = self.initial_tape.clone();
        self.head = 0;
        self.step_count = 0;
    }

    /// Replaces the tape contents and moves the head back to position 0.
    /// The state and step count are left as they are.
    pub fn set_tape_content(&mut self, content: &str) {
        self.tape = Tape::from_input(content, self.tape.blank());
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn zero_fill_table() -> TransitionTable {
        TransitionTable::from_json(
            r#"{"q0": {"1": ["0", "R", "q0"], "0": ["0", "R", "q0"], "_": ["_", "R", "HALT"]}}"#,
        )
        .unwrap()
    }

    /// Writes `1` and moves left forever; used to walk the head into negative positions.
    fn left_walker_table() -> TransitionTable {
        TransitionTable::new()
            .with_rule("walk", '_', Rule::new('1', Direction::Left, "walk"))
            .unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let table = zero_fill_table();
        let machine = TuringMachine::new(&table, "q0", "10101", '_').unwrap();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape().to_string(), "10101");
        assert_eq!(machine.symbol(), '1');
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_empty_initial_state_is_rejected() {
        let table = zero_fill_table();
        let result = TuringMachine::new(&table, "", "1", '_');

        assert_eq!(
            result.unwrap_err(),
            TapeMachineError::InvalidState(String::new())
        );
    }

    #[test]
    fn test_single_step() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "1", '_').unwrap();

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.tape().to_string(), "0");
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.symbol(), '_');
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_step_past_end_grows_tape() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "", '_').unwrap();

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.tape().render(), &['_']);
        assert_eq!(machine.state(), "HALT");
        assert_eq!(machine.head(), 1);
    }

    #[test]
    fn test_halt_leaves_machine_unchanged() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "x1", '_').unwrap();

        assert!(machine.is_halted());
        assert_eq!(machine.step(), Step::Halt);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape().to_string(), "x1");
        assert_eq!(machine.step_count(), 0);

        // Halting is idempotent.
        assert_eq!(machine.step(), Step::Halt);
        assert_eq!(machine.tape().to_string(), "x1");
    }

    #[test]
    fn test_unknown_start_state_halts_immediately() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "nowhere", "101", '_').unwrap();

        let result = machine.run(10);
        assert!(result.halted_naturally);
        assert_eq!(result.steps_executed, 0);
        assert_eq!(result.tape_string(), "101");
    }

    #[test]
    fn test_reference_run() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "10101", '_').unwrap();

        let result = machine.run(100);

        assert!(result.halted_naturally);
        assert_eq!(result.steps_executed, 6);
        assert_eq!(result.tape_string(), "00000_");
        assert_eq!(result.tape.len(), 6);
        assert_eq!(result.state, "HALT");
        assert_eq!(result.head, 6);
        assert_eq!(machine.step(), Step::Halt);
    }

    #[test]
    fn test_budget_exhaustion_is_not_a_halt() {
        let table = zero_fill_table();

        let mut paused = TuringMachine::new(&table, "q0", "10101", '_').unwrap();
        let result = paused.run(6);
        assert!(!result.halted_naturally);
        assert_eq!(result.steps_executed, 6);
        assert_eq!(result.state, "HALT");

        let mut halted = TuringMachine::new(&table, "q0", "10101", '_').unwrap();
        let result = halted.run(7);
        assert!(result.halted_naturally);
        assert_eq!(result.steps_executed, 6);
    }

    #[test]
    fn test_paused_run_can_be_resumed() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "10101", '_').unwrap();

        let first = machine.run(2);
        assert!(!first.halted_naturally);
        assert_eq!(first.tape_string(), "00101");
        assert_eq!(first.head, 2);

        let second = machine.run(100);
        assert!(second.halted_naturally);
        assert_eq!(second.steps_executed, 4);
        assert_eq!(second.tape_string(), "00000_");
        assert_eq!(machine.step_count(), 6);
    }

    #[test]
    fn test_zero_budget_performs_no_steps() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "", '_').unwrap();

        let result = machine.run(0);

        assert_eq!(result.steps_executed, 0);
        assert!(!result.halted_naturally);
        assert!(result.tape.is_empty());
        assert_eq!(result.state, "q0");
        assert_eq!(result.head, 0);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "10", '_').unwrap();
        let mut seen = Vec::new();

        let result = machine.run_with(100, &mut |snapshot: &Snapshot<'_>| {
            seen.push((
                snapshot.step,
                snapshot.state.to_string(),
                snapshot.head,
                snapshot.symbol,
                snapshot.tape.to_string(),
                snapshot.transition.read,
            ));
        });

        assert_eq!(result.steps_executed, 3);
        assert_eq!(
            seen,
            vec![
                (1, "q0".to_string(), 1, '0', "00".to_string(), '1'),
                (2, "q0".to_string(), 2, '_', "00".to_string(), '0'),
                (3, "HALT".to_string(), 3, '_', "00_".to_string(), '_'),
            ]
        );
    }

    #[test]
    fn test_observer_not_called_without_steps() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "1", '_').unwrap();
        let mut calls = 0;

        machine.run_with(0, &mut |_: &Snapshot<'_>| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_head_can_move_left_of_origin() {
        let table = left_walker_table();
        let mut machine = TuringMachine::new(&table, "walk", "", '_').unwrap();

        let result = machine.run(3);

        assert!(!result.halted_naturally);
        assert_eq!(result.head, -3);
        assert_eq!(result.tape_string(), "111");
        assert_eq!(machine.tape().leftmost(), -2);
    }

    #[test]
    fn test_reset() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "11", '_').unwrap();

        machine.run(100);
        assert_eq!(machine.state(), "HALT");

        machine.reset();
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.initial_state(), "q0");
        assert_eq!(machine.tape().to_string(), "11");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_set_tape_content() {
        let table = zero_fill_table();
        let mut machine = TuringMachine::new(&table, "q0", "11", '_').unwrap();
        machine.step();

        machine.set_tape_content("101");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape().to_string(), "101");
        assert_eq!(machine.blank(), '_');
    }

    #[test]
    fn test_transition_peek() {
        let table = zero_fill_table();
        let machine = TuringMachine::new(&table, "q0", "1", '_').unwrap();

        assert_eq!(
            machine.transition(),
            Some(&Rule::new('0', Direction::Right, "q0"))
        );
    }
}
