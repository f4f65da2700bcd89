//! Console output for a run: the banner, the per-step trace, and the final report.

use std::io::{self, BufRead, Write};
use tape_machine::{Observer, RunResult, Snapshot, StepBudget, Symbol, Tape};

pub fn print_banner() {
    println!("{}", "=".repeat(25));
    println!("===== Tape  Machine =====");
    println!("{}", "=".repeat(25));
    println!();
}

/// Renders the tape on one line and a caret under the head on the next.
/// The caret line is omitted when the head is outside the stored cells.
pub fn render_tape(tape: &Tape, head: i64) -> String {
    let cells = tape.to_string();
    let column = head - tape.leftmost();

    match usize::try_from(column) {
        Ok(column) if column <= tape.len() => {
            format!("| >>> {} <<<\n|     {}^", cells, " ".repeat(column))
        }
        _ => format!("| >>> {} <<<", cells),
    }
}

pub fn print_configuration(state: &str, symbol: Symbol, tape: &Tape, head: i64) {
    println!("\n> State: {}", state);
    println!("| Symbol under head: \"{}\"", symbol);
    println!("| Head position: {}", head);
    println!("{}", render_tape(tape, head));
}

/// Prints every step and optionally waits for Enter before the next one.
pub struct Console {
    quiet: bool,
    pause: bool,
    previous_state: String,
}

impl Console {
    pub fn new(initial_state: &str, quiet: bool, pause: bool) -> Self {
        Self {
            quiet,
            pause,
            previous_state: initial_state.to_string(),
        }
    }

    fn wait_for_enter(&self) {
        print!("\n... Press Enter to continue...");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            tracing::warn!(error = %e, "failed to read from stdin, not pausing");
        }
    }
}

impl Observer for Console {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        if !self.quiet {
            let transition = snapshot.transition;
            println!("\n> Step {}", snapshot.step);
            println!(
                "| Read \"{}\" at position {} in state {}",
                transition.read, transition.position, self.previous_state
            );
            println!(
                "| Wrote \"{}\", moved {}, now in state {}",
                transition.rule.write, transition.rule.direction, snapshot.state
            );
            println!("{}", render_tape(snapshot.tape, snapshot.head));
        }

        self.previous_state.clear();
        self.previous_state.push_str(snapshot.state);

        if self.pause {
            self.wait_for_enter();
        }
    }
}

pub fn print_result(result: &RunResult, budget: StepBudget, symbol: Symbol) {
    println!("\n[DONE] Execution finished.");
    println!("===============================");
    println!("Final tape: >>> {} <<<", result.tape_string());
    println!("Final state: {}", result.state);
    println!("Head position: {}", result.head);
    println!("Steps executed: {}", result.steps_executed);
    if result.halted_naturally {
        println!(
            "Halted: no rule for state '{}' and symbol \"{}\"",
            result.state, symbol
        );
    } else {
        println!("Paused: step budget of {} exhausted", budget);
    }
    println!("===============================");
}
