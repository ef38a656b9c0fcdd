//! Incremental program loading.
//!
//! Source text arrives in chunks (one line of a file at a time, or one whole
//! `-e` string). The loader strips whitespace and `#` line comments, keeps the
//! eight instruction symbols, and tracks bracket nesting as it goes so that a
//! stray `]` is rejected on the line where it appears.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::BrainfuckError;
use crate::instruction::Instruction;

/// What to do with bytes that are neither instructions, whitespace nor comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidCharPolicy {
    /// Drop them silently.
    Ignore,
    /// Drop them, recording a [`Diagnostic`] for each one.
    #[default]
    Report,
}

/// A non-fatal remark produced while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// An unrecognised byte was discarded.
    InvalidCharacter { byte: u8, line: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidCharacter { byte, line } => write!(
                f,
                "invalid character `{}' at line {line} discarded",
                byte.escape_ascii()
            ),
        }
    }
}

/// A validated, bracket-balanced instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.instructions.iter().try_for_each(|i| write!(f, "{i}"))
    }
}

/// Parses a whole string as a single inline unit, ignoring invalid characters.
impl FromStr for Program {
    type Err = BrainfuckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut loader = BrainfuckLoader::new(InvalidCharPolicy::Ignore);
        loader.append_inline(s.as_bytes())?;
        loader.finish()
    }
}

/// Builds a [`Program`] from source text delivered in chunks.
///
/// All loading state (nesting level, line number, comment flag) lives on the
/// loader itself, so independent loads never interfere with each other.
#[derive(Debug, Default)]
pub struct BrainfuckLoader {
    instructions: Vec<Instruction>,
    level: isize,
    // 0 until the first chunk arrives.
    line: usize,
    in_comment: bool,
    policy: InvalidCharPolicy,
    diagnostics: Vec<Diagnostic>,
}

impl BrainfuckLoader {
    pub fn new(policy: InvalidCharPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current line number, as used in error messages.
    pub fn line(&self) -> usize {
        self.line.max(1)
    }

    /// Number of `[` not yet closed.
    pub fn level(&self) -> isize {
        self.level
    }

    /// Whether the previous chunk ended inside a `#` comment.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Instructions accepted so far.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Remove and return the diagnostics collected since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Consume one chunk of file or stream input, continuing the line count
    /// and comment state left by the previous chunk.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), BrainfuckError> {
        if self.line == 0 {
            self.line = 1;
        }

        let chunk = if self.in_comment {
            // Still inside a comment: skip everything up to the newline.
            match chunk.iter().position(|&b| b == b'\n') {
                Some(nl) => &chunk[nl..],
                None => return Ok(()),
            }
        } else {
            chunk
        };

        self.instructions
            .try_reserve(chunk.len())
            .map_err(|source| BrainfuckError::AllocationFailure {
                what: "instructions",
                len: self.instructions.len() + chunk.len(),
                source,
            })?;

        let mut i = 0;
        while i < chunk.len() {
            let b = chunk[i];
            match b {
                b'[' => {
                    self.level += 1;
                    self.instructions.push(Instruction::LoopStart);
                }
                b']' => {
                    self.level -= 1;
                    if self.level < 0 {
                        return Err(BrainfuckError::UnmatchedClosingBracket { line: self.line });
                    }
                    self.instructions.push(Instruction::LoopEnd);
                }
                b'#' => match chunk[i..].iter().position(|&c| c == b'\n') {
                    // Resume at the newline so it still bumps the line count.
                    Some(offset) => {
                        i += offset;
                        continue;
                    }
                    None => {
                        self.in_comment = true;
                        return Ok(());
                    }
                },
                b'\n' => {
                    self.line += 1;
                    self.in_comment = false;
                }
                b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c' => {}
                _ => match Instruction::from_byte(b) {
                    Some(instr) => self.instructions.push(instr),
                    None => self.discard(b),
                },
            }
            i += 1;
        }

        Ok(())
    }

    /// Consume an inline program string. Each inline string counts as a new
    /// line and never continues a comment left open by an earlier one.
    pub fn append_inline(&mut self, text: &[u8]) -> Result<(), BrainfuckError> {
        self.line += 1;
        self.in_comment = false;
        self.append(text)
    }

    /// Feed a whole reader through [`append`](Self::append), one line at a time.
    pub fn load_reader<R: BufRead>(&mut self, mut reader: R) -> Result<(), BrainfuckError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| BrainfuckError::SourceRead { source })?;
            if n == 0 {
                return Ok(());
            }
            self.append(&buf)?;
        }
    }

    /// Validate the final nesting level and hand over the instructions.
    pub fn finish(self) -> Result<Program, BrainfuckError> {
        debug_assert!(
            self.level >= 0,
            "negative nesting level should have been rejected by append"
        );
        tracing::debug!(
            instructions = self.instructions.len(),
            lines = self.line(),
            level = self.level,
            "program loaded"
        );

        if self.level > 0 {
            return Err(BrainfuckError::UnmatchedOpeningBracket {
                count: self.level as usize,
            });
        }
        if self.level < 0 {
            return Err(BrainfuckError::UnmatchedClosingBracket { line: self.line() });
        }

        Ok(Program {
            instructions: self.instructions,
        })
    }

    fn discard(&mut self, byte: u8) {
        if self.policy == InvalidCharPolicy::Report {
            let diagnostic = Diagnostic::InvalidCharacter {
                byte,
                line: self.line,
            };
            tracing::debug!(%diagnostic);
            self.diagnostics.push(diagnostic);
        }
    }
}
