use std::collections::TryReserveError;
use std::path::PathBuf;

/// Errors that can occur while loading or interpreting Brainfuck code.
///
/// Every variant is fatal: the interpreter reports it once and stops.
/// Invalid source characters are not errors; see [`crate::Diagnostic`].
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// A `]` appeared while no `[` was open.
    #[error("unmatched closing bracket on line {line}")]
    UnmatchedClosingBracket { line: usize },

    /// Loading finished with `count` brackets still open.
    #[error("program contains {count} unmatched opening bracket{}", plural(.count))]
    UnmatchedOpeningBracket { count: usize },

    /// The tape or the instruction buffer could not be sized.
    #[error("could not allocate {len} {what}")]
    AllocationFailure {
        what: &'static str,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// The program source could not be opened.
    #[error("{}: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the program source failed partway through.
    #[error("error reading file: {source}")]
    SourceRead {
        #[source]
        source: std::io::Error,
    },

    /// The program's own input or output stream failed during execution.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 { "" } else { "s" }
}

impl BrainfuckError {
    /// Process exit status conventionally associated with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BrainfuckError::UnmatchedClosingBracket { .. }
            | BrainfuckError::UnmatchedOpeningBracket { .. } => 3,
            BrainfuckError::SourceRead { .. } => 4,
            BrainfuckError::SourceOpen { .. } => 5,
            BrainfuckError::AllocationFailure { .. } | BrainfuckError::Io { .. } => 1,
        }
    }
}
