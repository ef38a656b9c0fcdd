//! Executes a loaded [`Program`] against a wrap-around [`Tape`].
//!
//! Loops are resolved by scanning the instruction buffer for the partner
//! bracket every time a loop boundary is taken, rather than through a jump
//! table. The loader guarantees the brackets balance, so a scan always finds
//! its match.

use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::BrainfuckError;
use crate::instruction::Instruction;
use crate::loader::Program;
use crate::tape::Tape;

/// Tape length used when none is configured.
pub const DEFAULT_TAPE_SIZE: NonZeroUsize = NonZeroUsize::new(30_000).unwrap();

/// How `.` renders the current cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Write the cell as a raw byte.
    #[default]
    Char,
    /// Write the cell as a decimal number followed by a space.
    Numeric,
}

/// What `,` does to the current cell when input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EofBehavior {
    /// Leave the cell as it was.
    #[default]
    Unchanged,
    /// Store 0 in the cell.
    Zero,
}

impl FromStr for EofBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unchanged" | "keep" => Ok(EofBehavior::Unchanged),
            "zero" | "0" => Ok(EofBehavior::Zero),
            other => Err(format!("unknown EOF behavior `{other}' (expected `unchanged' or `zero')")),
        }
    }
}

/// Settings consumed by [`BrainfuckEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tape_size: NonZeroUsize,
    pub output_mode: OutputMode,
    pub eof: EofBehavior,
    /// Emit a newline once the program finishes.
    pub trailing_newline: bool,
    /// Number of leading cells to print after the program finishes.
    pub dump_cells: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            output_mode: OutputMode::Char,
            eof: EofBehavior::Unchanged,
            trailing_newline: true,
            dump_cells: 0,
        }
    }
}

/// Runs programs to completion. Each call to [`execute`](Self::execute)
/// gets a fresh tape.
#[derive(Debug, Clone, Default)]
pub struct BrainfuckEngine {
    config: EngineConfig,
}

impl BrainfuckEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute `program`, reading `,` bytes from `input` and writing `.`
    /// output, the trailing newline and the tape dump to `output`.
    ///
    /// Returns the final tape so callers can inspect it.
    pub fn execute<R: Read, W: Write>(
        &self,
        program: &Program,
        mut input: R,
        mut output: W,
    ) -> Result<Tape, BrainfuckError> {
        let mut tape = Tape::new(self.config.tape_size)?;
        let code = program.instructions();
        tracing::debug!(
            instructions = code.len(),
            tape_size = tape.len(),
            "execution started"
        );

        let mut ip = 0;
        while ip < code.len() {
            let instr = code[ip];
            tracing::trace!(ip, ptr = tape.pointer(), cell = tape.get(), op = %instr);

            match instr {
                Instruction::Right => tape.move_right(),
                Instruction::Left => tape.move_left(),
                Instruction::Increment => tape.increment(),
                Instruction::Decrement => tape.decrement(),
                Instruction::Output => match self.config.output_mode {
                    OutputMode::Char => output.write_all(&[tape.get()])?,
                    OutputMode::Numeric => write!(output, "{} ", tape.get())?,
                },
                Instruction::Input => {
                    // Make any prompt visible before blocking on input.
                    output.flush()?;
                    match read_byte(&mut input)? {
                        Some(b) => tape.set(b),
                        None if self.config.eof == EofBehavior::Zero => tape.set(0),
                        None => {}
                    }
                }
                Instruction::LoopStart => {
                    if tape.get() == 0 {
                        ip = matching_close(code, ip);
                    }
                }
                Instruction::LoopEnd => {
                    if tape.get() != 0 {
                        ip = matching_open(code, ip);
                    }
                }
            }

            ip += 1;
        }

        self.finish(&tape, &mut output)?;
        tracing::debug!(ptr = tape.pointer(), "execution finished");
        Ok(tape)
    }

    fn finish<W: Write>(&self, tape: &Tape, output: &mut W) -> io::Result<()> {
        if self.config.trailing_newline {
            output.write_all(b"\n")?;
        }
        if self.config.dump_cells > 0 {
            let shown = self.config.dump_cells.min(tape.len());
            let dump = tape.cells()[..shown]
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(output, "{dump}")?;
        }
        output.flush()
    }
}

/// Read one byte, or `None` at end of input.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Index of the `]` closing the `[` at `open`.
fn matching_close(code: &[Instruction], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, instr) in code.iter().enumerate().skip(open) {
        match instr {
            Instruction::LoopStart => depth += 1,
            Instruction::LoopEnd => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    unreachable!("no ']' matches '[' at instruction {open}; program was not validated")
}

/// Index of the `[` opening the `]` at `close`.
fn matching_open(code: &[Instruction], close: usize) -> usize {
    let mut depth = 0usize;
    for (i, instr) in code[..=close].iter().enumerate().rev() {
        match instr {
            Instruction::LoopEnd => depth += 1,
            Instruction::LoopStart => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    unreachable!("no '[' matches ']' at instruction {close}; program was not validated")
}
