//! tapcalc CLI: drive the keypad engine from a terminal.
//!
//! ## Usage
//!
//! ```bash
//! tapcalc --keys "7 + 5 ="          # apply keys, print the readout
//! echo "1 / 0 =" | tapcalc          # read button labels from stdin
//! tapcalc                           # interactive: one line of labels at a time
//! ```

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod error;
mod session;

use error::{CliError, CliResult};
use session::Session;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "tapcalc", about = "Keypad calculator engine driver", version)]
struct Cli {
    /// Whitespace-separated button labels to apply (skips stdin)
    #[arg(long)]
    keys: Option<String>,

    /// Print a readout only when stdin runs out, not after every line
    #[arg(long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let color = !cli.no_color && io::stdout().is_terminal();
    let mut session = Session::new(color);

    if let Some(keys) = &cli.keys {
        session.apply_line(keys)?;
        println!("{}", session.render());
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "q" | "quit" | "exit") {
            break;
        }
        match session.apply_line(line) {
            Ok(()) => {
                if !cli.quiet {
                    println!("{}", session.render());
                }
            }
            // A typo should not end the session; report and keep going.
            Err(err @ CliError::UnknownKey { .. }) => eprintln!("{err}"),
            Err(err) => return Err(err),
        }
    }

    if cli.quiet {
        println!("{}", session.render());
    }
    Ok(())
}
