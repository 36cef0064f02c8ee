//! Tally CLI - command-line calculator
//!
//! Usage:
//!   tally                      # Interactive session reading stdin
//!   tally eval 2 + 3 × 4       # Evaluate one expression and exit
//!   tally history [--clear]    # Show or clear saved history

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tally::prelude::*;
use tally::DEFAULT_HISTORY_CAPACITY;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Arithmetic calculator with history")]
struct Cli {
    /// History file (default: <data dir>/tally/history.json)
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// Do not load or save history
    #[arg(long, global = true)]
    no_history: bool,

    /// Maximum number of history entries kept
    #[arg(long, global = true, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    capacity: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    #[command(alias = "e")]
    Eval {
        /// Expression; multiple words are joined with spaces
        #[arg(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Read expressions from stdin, one per line
    Repl,

    /// Show saved history
    History {
        /// Remove all saved entries
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    // Respects RUST_LOG; stdout is reserved for results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();

    match run(cli, stdin.lock(), &mut io::stdout(), &mut io::stderr()) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

/// Whether the command did what was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

fn run(
    cli: Cli,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let options = calculator_options(&cli);
    let mut calc = Calculator::open(options).context("Failed to load history")?;

    match cli.command {
        Some(Commands::Eval { expression }) => eval(&mut calc, &expression.join(" "), out, err),
        Some(Commands::Repl) | None => repl(&mut calc, input, out),
        Some(Commands::History { clear }) => history(&mut calc, clear, out, err),
    }
}

fn calculator_options(cli: &Cli) -> CalculatorOptions {
    let history_path = if cli.no_history {
        None
    } else {
        cli.history_file.clone().or_else(default_history_path)
    };

    CalculatorOptions {
        history_capacity: cli.capacity,
        history_path,
    }
}

fn default_history_path() -> Option<PathBuf> {
    let path = dirs::data_dir().map(|dir| dir.join("tally").join("history.json"));
    if path.is_none() {
        tracing::warn!("No data directory available; history will not be saved");
    }
    path
}

fn eval(
    calc: &mut Calculator,
    expression: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let calculation = calc.calculate(expression);
    writeln!(out, "{}", calculation.display).context("Failed to write to stdout")?;
    save(calc);

    if let Err(e) = &calculation.result {
        writeln!(err, "{e}").context("Failed to write to stderr")?;
    }

    Ok(if calculation.is_error() {
        Outcome::Failure
    } else {
        Outcome::Success
    })
}

/// One line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Skip,
    Quit,
    History,
    Clear,
    Evaluate(&'a str),
}

fn parse_repl_line(line: &str) -> ReplCommand<'_> {
    match line.trim() {
        "" => ReplCommand::Skip,
        ":quit" | ":q" => ReplCommand::Quit,
        ":history" => ReplCommand::History,
        ":clear" => ReplCommand::Clear,
        expression => ReplCommand::Evaluate(expression),
    }
}

fn repl(calc: &mut Calculator, mut input: impl BufRead, out: &mut impl Write) -> Result<Outcome> {
    loop {
        write!(out, "> ").context("Failed to write to stdout")?;
        out.flush().context("Failed to write to stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        match parse_repl_line(&line) {
            ReplCommand::Skip => continue,
            ReplCommand::Quit => break,
            ReplCommand::History => print_history(calc.history(), out)?,
            ReplCommand::Clear => {
                calc.clear_history();
                writeln!(out, "History cleared").context("Failed to write to stdout")?;
            }
            ReplCommand::Evaluate(expression) => {
                let calculation = calc.calculate(expression);
                writeln!(out, "{}", calculation.display).context("Failed to write to stdout")?;
            }
        }
    }

    save(calc);
    Ok(Outcome::Success)
}

fn history(
    calc: &mut Calculator,
    clear: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    if !clear {
        print_history(calc.history(), out)?;
        return Ok(Outcome::Success);
    }

    if calc.options().history_path.is_none() {
        writeln!(err, "History is disabled; nothing to clear")
            .context("Failed to write to stderr")?;
        return Ok(Outcome::Success);
    }

    calc.clear_history();
    calc.save().context("Failed to save history")?;
    writeln!(err, "History cleared").context("Failed to write to stderr")?;
    Ok(Outcome::Success)
}

fn print_history(history: &History, out: &mut impl Write) -> Result<()> {
    for entry in history.entries() {
        writeln!(out, "{} = {}", entry.expression, entry.display)
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

/// Save history, logging failures
fn save(calc: &Calculator) {
    if let Err(e) = calc.save() {
        tracing::warn!("Failed to save history: {e}");
    }
}
