mod report;

use anyhow::{Context, Result};
use clap::Parser;
use report::Console;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tape_machine::{
    analyze, Program, ProgramLoader, ProgramManager, StepBudget, TuringMachine,
    DEFAULT_STEP_BUDGET,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Runs a single-tape automaton step by step.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tape-machine --tape 10101 --max-steps 100
  tape-machine --builtin \"Busy beaver 2\" --step
  tape-machine --program machine.json --quiet")]
struct Cli {
    /// JSON program file to execute
    #[clap(short, long, env = "TAPE_MACHINE_PROGRAM", conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// Name of a built-in program (defaults to the first one)
    #[clap(short, long)]
    builtin: Option<String>,

    /// Initial tape contents; prompted for when omitted on a terminal
    #[clap(short, long)]
    tape: Option<String>,

    /// Maximum number of steps; prompted for when omitted on a terminal
    #[clap(short, long, env = "TAPE_MACHINE_MAX_STEPS", allow_hyphen_values = true)]
    max_steps: Option<StepBudget>,

    /// Wait for Enter after every step
    #[clap(short, long)]
    step: bool,

    /// Only print the final report
    #[clap(short, long)]
    quiet: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Print debug logs
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if cli.list {
        list_programs()?;
        return Ok(());
    }

    let program = load_program(&cli)?;
    for warning in analyze(&program) {
        warn!(program = %program.name, "{}", warning);
    }

    let interactive = atty::is(atty::Stream::Stdin);
    if interactive && (cli.tape.is_none() || cli.max_steps.is_none()) {
        report::print_banner();
        println!("Program: {}", program.name);
    }

    let tape = match cli.tape {
        Some(tape) => tape,
        None if interactive => prompt_tape(&program.tape)?,
        None => program.tape.clone(),
    };
    let budget = match cli.max_steps {
        Some(budget) => budget,
        None if interactive => prompt_budget()?,
        None => StepBudget::new(DEFAULT_STEP_BUDGET),
    };
    if cli.step && !interactive {
        warn!("stdin is not a terminal, --step will consume input lines");
    }

    let mut machine = TuringMachine::new(
        &program.rules,
        program.initial_state.as_str(),
        &tape,
        program.blank,
    )
    .with_context(|| format!("Failed to start program '{}'", program.name))?;

    info!(program = %program.name, %budget, "starting");
    if !cli.quiet {
        println!("\n[START] Running '{}'", program.name);
        report::print_configuration(
            machine.state(),
            machine.symbol(),
            machine.tape(),
            machine.head(),
        );
    }

    let mut console = Console::new(machine.state(), cli.quiet, cli.step);
    let result = machine.run_with(budget.get(), &mut console);
    debug!(?result, "run result");

    report::print_result(&result, budget, machine.symbol());
    Ok(())
}

/// Loads the program named on the command line, falling back to the first built-in.
fn load_program(cli: &Cli) -> Result<Program> {
    if let Some(path) = &cli.program {
        return ProgramLoader::load_program(path)
            .with_context(|| format!("Failed to load program from {}", path.display()));
    }

    let program = match &cli.builtin {
        Some(name) => ProgramManager::get_program_by_name(name)?,
        None => ProgramManager::get_program_by_index(0)?,
    };
    Ok(program.clone())
}

fn list_programs() -> Result<()> {
    for index in 0..ProgramManager::get_program_count() {
        let info = ProgramManager::get_program_info(index)?;
        println!(
            "{:>2}. {:<20} start: {:<8} tape: {:<10} states: {:<3} rules: {}",
            info.index + 1,
            info.name,
            info.initial_state,
            info.initial_tape,
            info.state_count,
            info.rule_count
        );
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_tape(default: &str) -> Result<String> {
    let line = read_line(&format!("Initial tape (e.g. 10101) [{}]: ", default))?;
    Ok(if line.is_empty() {
        default.to_string()
    } else {
        line
    })
}

fn prompt_budget() -> Result<StepBudget> {
    let line = read_line(&format!("Maximum number of steps [{}]: ", DEFAULT_STEP_BUDGET))?;
    if line.is_empty() {
        return Ok(StepBudget::new(DEFAULT_STEP_BUDGET));
    }

    Ok(line.parse::<StepBudget>()?)
}
