//! A streaming Brainfuck interpreter.
//!
//! Programs are interpreted straight from source text in two phases:
//!
//! - [`BrainfuckLoader`] consumes text chunk by chunk (lines of a file, or
//!   whole inline strings), drops whitespace, `#` line comments and invalid
//!   characters, and rejects a `]` without a matching `[` on the line where it
//!   appears. [`BrainfuckLoader::finish`] then rejects unclosed `[`.
//! - [`BrainfuckEngine`] runs the resulting [`Program`] over a zeroed tape of
//!   byte cells (30,000 by default) that wraps around at both ends. Cell
//!   arithmetic wraps modulo 256.
//!
//! Behaviors:
//! - `.` writes the cell as a raw byte, or as a decimal number followed by a
//!   space in [`OutputMode::Numeric`].
//! - `,` reads one byte; at end of input the cell is left unchanged unless
//!   [`EofBehavior::Zero`] is configured.
//! - After the program ends a newline is written (unless disabled) and,
//!   optionally, the first N cells are dumped as decimal values.
//!
//! Quick start:
//!
//! ```
//! use ringtape::{run_source, EngineConfig};
//!
//! let mut out = Vec::new();
//! run_source("++++++++[>++++++++<-]>.", &EngineConfig::default(), &b""[..], &mut out)
//!     .expect("program should run");
//! assert_eq!(out, b"@\n");
//! ```

pub mod cli_util;
pub mod config;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod loader;
pub mod tape;
pub mod terminal;

use std::io::{Read, Write};

pub use engine::{BrainfuckEngine, EngineConfig, EofBehavior, OutputMode, DEFAULT_TAPE_SIZE};
pub use error::BrainfuckError;
pub use instruction::Instruction;
pub use loader::{BrainfuckLoader, Diagnostic, InvalidCharPolicy, Program};
pub use tape::Tape;

/// Load `source` as a single inline program and execute it.
///
/// Invalid characters are ignored. Bracket errors are reported before any
/// instruction runs.
pub fn run_source<R: Read, W: Write>(
    source: &str,
    config: &EngineConfig,
    input: R,
    output: W,
) -> Result<Tape, BrainfuckError> {
    let program: Program = source.parse()?;
    BrainfuckEngine::new(config.clone()).execute(&program, input, output)
}
