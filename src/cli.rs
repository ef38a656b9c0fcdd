use std::fs::File;
use std::io::{self, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::Parser;
use ringtape::cli_util::{print_diagnostics, print_error, print_warning};
use ringtape::config::Defaults;
use ringtape::terminal::{self, RawInputGuard};
use ringtape::{
    BrainfuckEngine, BrainfuckError, BrainfuckLoader, DEFAULT_TAPE_SIZE, EngineConfig, EofBehavior,
    InvalidCharPolicy, Program,
};

#[derive(Parser, Debug)]
#[command(
    name = "ringtape",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Set the size of the tape to NUM cells
    #[arg(short = 'a', long = "array-size", value_name = "NUM")]
    pub array_size: Option<NonZeroUsize>,

    /// Deliver keypresses to `,` immediately instead of line by line
    #[arg(short = 'b', long = "unbuffered")]
    pub unbuffered: bool,

    /// Make `.` output values as decimal numbers
    #[arg(short = 'd', long = "digits")]
    pub digits: bool,

    /// Execute the given code (repeatable; each occurrence is a new line)
    #[arg(short = 'e', long = "eval", value_name = "CODE", allow_hyphen_values = true)]
    pub eval: Vec<String>,

    /// Ignore invalid characters in source
    #[arg(short = 'i', long = "ignore")]
    pub ignore: bool,

    /// Do not print a newline on program termination
    #[arg(short = 'n', long = "no-newline")]
    pub no_newline: bool,

    /// Print the first NUM cells of the tape on termination
    #[arg(short = 'p', long = "print", value_name = "NUM")]
    pub print: Option<usize>,

    /// What `,` does at end of input: `unchanged` or `zero`
    #[arg(long = "eof", value_name = "POLICY")]
    pub eof: Option<EofBehavior>,

    /// Display summaries of the Brainfuck commands and exit
    #[arg(long = "commands")]
    pub commands: bool,

    /// Display version & configuration information and exit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Show this help
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Program file; `-` or nothing reads the program from stdin
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line flags on top of file/env defaults.
    fn overlay(&self, mut defaults: Defaults) -> Defaults {
        if let Some(size) = self.array_size {
            defaults.array_size = Some(size);
        }
        if self.digits {
            defaults.digits = Some(true);
        }
        if self.ignore {
            defaults.ignore_invalid = Some(true);
        }
        if self.no_newline {
            defaults.no_newline = Some(true);
        }
        if let Some(n) = self.print {
            defaults.print = Some(n);
        }
        if let Some(eof) = self.eof {
            defaults.eof = Some(eof);
        }
        defaults
    }
}

pub fn run(program: &str, cli: Cli) -> i32 {
    if cli.help {
        usage_and_exit(program, 0);
    }
    if cli.commands {
        print_commands();
        return 0;
    }
    if cli.version {
        print_version();
        return 0;
    }
    if let (false, Some(path)) = (cli.eval.is_empty(), cli.file.as_deref()) {
        print_warning(
            Some(program),
            &format!("ignoring program file {} because --eval was given", path.display()),
        );
    }

    let settings = cli.overlay(Defaults::load());
    tracing::debug!(?settings, "resolved settings");

    let code = match load(program, &cli, settings.invalid_char_policy()) {
        Ok(code) => code,
        Err(e) => {
            print_error(Some(program), &e);
            return e.exit_code();
        }
    };

    if code.is_empty() {
        tracing::debug!("empty program; nothing to execute");
        return 0;
    }

    match execute(program, &code, settings.engine_config(), cli.unbuffered) {
        Ok(()) => 0,
        Err(e) => {
            print_error(Some(program), &e);
            e.exit_code()
        }
    }
}

fn load(program: &str, cli: &Cli, policy: InvalidCharPolicy) -> Result<Program, BrainfuckError> {
    let mut loader = BrainfuckLoader::new(policy);

    if !cli.eval.is_empty() {
        for code in &cli.eval {
            let result = loader.append_inline(code.as_bytes());
            print_diagnostics(Some(program), &loader.take_diagnostics());
            result?;
        }
        return loader.finish();
    }

    let result = match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).map_err(|source| BrainfuckError::SourceOpen {
                path: path.to_path_buf(),
                source,
            })?;
            loader.load_reader(BufReader::new(file))
        }
        _ => loader.load_reader(io::stdin().lock()),
    };
    print_diagnostics(Some(program), &loader.take_diagnostics());
    result?;
    loader.finish()
}

fn execute(
    program: &str,
    code: &Program,
    config: EngineConfig,
    unbuffered: bool,
) -> Result<(), BrainfuckError> {
    install_interrupt_handler();

    // Held until execution returns, on success or error.
    let _raw = if unbuffered {
        acquire_raw_input(program)
    } else {
        None
    };

    // Unlocked handle: the interrupt handler must be able to flush it.
    BrainfuckEngine::new(config).execute(code, io::stdin().lock(), io::stdout())?;
    Ok(())
}

/// On SIGINT, flush pending program output and restore the terminal mode.
fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = terminal::restore();
        std::process::exit(130);
    }) {
        tracing::warn!(error = %e, "failed to set interrupt handler");
    }
}

fn acquire_raw_input(program: &str) -> Option<RawInputGuard> {
    match RawInputGuard::acquire() {
        Ok(guard) => guard,
        Err(e) => {
            print_warning(Some(program), &format!("could not disable canonical input: {e}"));
            None
        }
    }
}

fn print_commands() {
    println!(
        r#"Brainfuck commands:
 >  Increment pointer
 <  Decrement pointer
 +  Increment value at pointer
 -  Decrement value at pointer
 .  Output character value at pointer
 ,  Read character and store in value at pointer
 [  Skip to corresponding ] if value at pointer is zero
 ]  Skip back to corresponding [ unless value at pointer is zero"#
    );
}

fn print_version() {
    println!(
        r#"ringtape, a Brainfuck interpreter, v{version}
Configuration details:
  Size of array cells: {cell} byte{plural}
  Default length of data array: {len}
  Support for unbuffered input: enabled"#,
        version = env!("CARGO_PKG_VERSION"),
        cell = size_of::<u8>(),
        plural = if size_of::<u8>() > 1 { "s" } else { "" },
        len = DEFAULT_TAPE_SIZE,
    );
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [-bdin] [-a NUM] [-p NUM] [--eof POLICY] [-e CODE]... [FILE|-]

Options:
  --array-size, -a <NUM>  Set the size of the tape to NUM cells (default 30000)
  --unbuffered, -b        Deliver keypresses to `,` immediately (TTY only)
  --digits,     -d        Make `.` output values as numbers
  --eval,       -e <CODE> Execute given Brainfuck code (repeatable)
  --ignore,     -i        Ignore invalid characters in source
  --no-newline, -n        Do not print a newline on program termination
  --print,      -p <NUM>  Print the first NUM cells of the tape on termination
  --eof <POLICY>          On end of input, leave the cell `unchanged' (default) or `zero' it
  --commands              Display summaries of the Brainfuck commands and exit
  --version,    -V        Display version & configuration information and exit
  --help,       -h        Show this help

Notes:
- Without --eval, the program is read from FILE, or from stdin when FILE is
  absent or `-`.
- Text from `#` to the end of the line is a comment.
- Defaults may be set in ringtape.toml under the XDG config home
  (or the file named by RINGTAPE_CONFIG), and via RINGTAPE_ARRAY_SIZE and
  RINGTAPE_EOF.
- Set RUST_LOG=debug for diagnostic logging on stderr.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["ringtape", "-a", "12", "-d", "-p", "3", "--eof", "zero", "-e", "+"]);
        let defaults = Defaults {
            array_size: NonZeroUsize::new(100),
            print: Some(1),
            ..Defaults::default()
        };
        let settings = cli.overlay(defaults);
        assert_eq!(settings.array_size, NonZeroUsize::new(12));
        assert_eq!(settings.digits, Some(true));
        assert_eq!(settings.print, Some(3));
        assert_eq!(settings.eof, Some(EofBehavior::Zero));
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let cli = Cli::parse_from(["ringtape", "prog.bf"]);
        let defaults = Defaults {
            no_newline: Some(true),
            ignore_invalid: Some(true),
            ..Defaults::default()
        };
        assert_eq!(cli.overlay(defaults.clone()), defaults);
        assert_eq!(cli.file.as_deref(), Some(Path::new("prog.bf")));
    }

    #[test]
    fn eval_is_repeatable_and_accepts_leading_hyphen() {
        let cli = Cli::parse_from(["ringtape", "-e", "-+", "-e", "."]);
        assert_eq!(cli.eval, vec!["-+".to_string(), ".".to_string()]);
    }

    #[test]
    fn zero_array_size_is_rejected() {
        assert!(Cli::try_parse_from(["ringtape", "-a", "0"]).is_err());
    }
}
