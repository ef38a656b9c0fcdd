use std::io::{self, Write};

use crate::error::BrainfuckError;
use crate::loader::Diagnostic;

/// Prefix `msg` with the program name, if there is one.
pub fn prefixed(program: Option<&str>, msg: &str) -> String {
    match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg.to_string(),
    }
}

/// Render an error the way the command line reports it.
pub fn format_error(program: Option<&str>, err: &BrainfuckError) -> String {
    match err {
        BrainfuckError::AllocationFailure { source, .. } => {
            prefixed(program, &format!("{err}: {source}"))
        }
        _ => prefixed(program, &err.to_string()),
    }
}

pub fn print_error(program: Option<&str>, err: &BrainfuckError) {
    eprintln!("{}", format_error(program, err));
    let _ = io::stderr().flush();
}

/// Print loader diagnostics, one per line.
pub fn print_diagnostics(program: Option<&str>, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("{}", prefixed(program, &d.to_string()));
    }
    if !diagnostics.is_empty() {
        let _ = io::stderr().flush();
    }
}

pub fn print_warning(program: Option<&str>, msg: &str) {
    eprintln!("{}", prefixed(program, &format!("warning: {msg}")));
    let _ = io::stderr().flush();
}
