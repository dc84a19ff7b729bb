mod logging;

use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::process;
use tmsim::{
    analyze, render_tape, Configuration, Machine, MachineError, Outcome, ProgramManager,
    RunOptions, DEFAULT_MAX_STEPS,
};
use tracing::{error, info};

/// Runs one of the built-in deterministic Turing Machines on an input tape.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tmsim-cli --program ab-then-as --input abaa --trace
  echo 1011 | tmsim-cli --program binary-increment")]
struct Cli {
    /// Name of the built-in program to run
    #[clap(short, long, required_unless_present = "list")]
    program: Option<String>,

    /// The symbols placed on the tape. Read from stdin when omitted and piped.
    #[clap(short, long)]
    input: Option<String>,

    /// Maximum number of iterations before giving up
    #[clap(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each configuration of the execution
    #[clap(short, long)]
    trace: bool,

    /// Output format for traced configurations
    #[clap(long, value_enum, default_value_t = TraceFormat::Text)]
    format: TraceFormat,

    /// Report progress through the step budget
    #[clap(long)]
    progress: bool,

    /// Run the static analyzer on the program before executing it
    #[clap(short, long)]
    check: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TraceFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.progress);

    if cli.list {
        list_programs();
        return;
    }

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match run(&cli, &input) {
        Ok((outcome, machine)) => {
            if cli.trace {
                println!();
            }
            log_outcome(outcome, &machine);
            println!("Result: {}", outcome);
            println!(
                "Tape: {}",
                render_tape(machine.tape(), machine.head_position(), machine.empty_symbol())
            );
            println!("Head Position: {}", machine.head_position());
            println!(
                "Final State: {}",
                machine.current_state().map_or("None", |s| s.name())
            );
        }
        Err(e) => {
            report_failure(&e);
            process::exit(1);
        }
    }
}

fn log_outcome(outcome: Outcome, machine: &Machine) {
    info!(
        %outcome,
        steps = machine.step_count(),
        head = machine.head_position(),
        "run finished"
    );
}

fn report_failure(e: &MachineError) {
    error!(error = %e, "machine error");
}

fn list_programs() {
    for index in 0..ProgramManager::get_program_count() {
        if let Ok(info) = ProgramManager::get_program_info(index) {
            println!(
                "{:<18} {} ({} states, {} transitions)",
                info.name, info.description, info.state_count, info.transition_count
            );
        }
    }
}

/// Takes the input from `--input`, then from piped stdin, and falls back to an empty tape.
fn read_input(cli: &Cli) -> Result<String, String> {
    if let Some(input) = &cli.input {
        Ok(input.clone())
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer.trim().to_string())
    } else {
        Ok(String::new())
    }
}

fn run(cli: &Cli, input: &str) -> Result<(Outcome, Machine), MachineError> {
    let name = cli.program.as_deref().unwrap_or_default();
    let program = ProgramManager::get_program_by_name(name)?;

    if cli.check {
        analyze(&program.states)?;
    }

    let mut machine = program.machine(input)?;

    let options = RunOptions {
        max_steps: cli.max_steps,
        trace: false,
        show_progress: cli.progress,
    };

    let outcome = if cli.trace {
        let format = cli.format;
        machine.run_traced(&options, |config| print_configuration(config, format))?
    } else {
        machine.run_with(&options)?
    };

    Ok((outcome, machine))
}

fn print_configuration(config: &Configuration<'_>, format: TraceFormat) {
    match format {
        TraceFormat::Text => println!("{}", config),
        TraceFormat::Json => match config.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to serialize configuration: {}", e),
        },
    }
}
