//! Formatted output helpers for CLI actions.
//!
//! Results go to stdout, failures to stderr. Colors are only emitted when
//! the stream is a terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{BufRead, IsTerminal, Write};

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints a progress or informational line.
pub fn info(message: &str) {
    println!("{message}");
}

/// Prints a line reporting a completed action.
pub fn success(message: &str) {
    if std::io::stdout().is_terminal() {
        println!("{GREEN}{message}{RESET}");
    } else {
        println!("{message}");
    }
}

/// Prints text exactly as received, without a trailing newline of its own.
pub fn raw(text: &str) {
    print!("{text}");
}

/// Asks for a line of input on stdin, returning it trimmed.
///
/// End of input yields an empty string.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed or stdin cannot be read.
pub fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prints a failed-action message to stderr.
pub fn failure(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{RED}{message}{RESET}");
    } else {
        eprintln!("{message}");
    }
}

/// Prints usage text to stderr.
pub fn usage(text: &str) {
    eprint!("{text}");
}

/// Prints an action error, including its chain of causes, to stderr.
pub fn error(err: &anyhow::Error) {
    let text = format_error(err);
    if std::io::stderr().is_terminal() {
        eprintln!("{RED}{BOLD}Error:{RESET} {text}");
    } else {
        eprintln!("Error: {text}");
    }
}

/// Joins an error and its causes on one line.
#[must_use]
pub fn format_error(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// Describes the logged-in user for `--whoami`.
#[must_use]
pub fn format_whoami(display_name: &str) -> String {
    if display_name.is_empty() {
        "No user is currently logged in.".to_string()
    } else {
        format!("Current logged-in user: {display_name}")
    }
}
