//! Unbuffered terminal input for `,`.
//!
//! With canonical input the terminal delivers nothing until Enter is pressed.
//! [`RawInputGuard`] turns canonical processing off for the lifetime of the
//! guard so each keypress reaches the program immediately. On unix only
//! `ICANON` is cleared: echo, Ctrl-C signals and output newline translation
//! stay as they were.

use std::io::{self, IsTerminal};

/// Keeps stdin in non-canonical mode until dropped.
#[derive(Debug)]
pub struct RawInputGuard {
    _private: (),
}

impl RawInputGuard {
    /// Disable canonical input if stdin is a terminal.
    ///
    /// Returns `Ok(None)` when stdin is not a terminal (nothing to change).
    pub fn acquire() -> io::Result<Option<Self>> {
        if !io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal; leaving input mode alone");
            return Ok(None);
        }
        imp::enable()?;
        tracing::debug!("canonical terminal input disabled");
        Ok(Some(Self { _private: () }))
    }
}

impl Drop for RawInputGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "error restoring canonical input mode");
        }
    }
}

/// Put back the terminal mode saved by [`RawInputGuard::acquire`].
/// Does nothing if no mode is saved.
pub fn restore() -> io::Result<()> {
    imp::restore()
}

#[cfg(unix)]
mod imp {
    use std::io;
    use std::mem::MaybeUninit;
    use std::sync::Mutex;

    // Mode in effect before `enable`; taken back by `restore`.
    static SAVED: Mutex<Option<libc::termios>> = Mutex::new(None);

    /// Clear canonical processing only; one byte satisfies a read.
    pub(super) fn non_canonical(mut term: libc::termios) -> libc::termios {
        term.c_lflag &= !libc::ICANON;
        term.c_cc[libc::VMIN] = 1;
        term.c_cc[libc::VTIME] = 0;
        term
    }

    pub(super) fn enable() -> io::Result<()> {
        let mut current = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr fills the struct on success; it is only read after a 0 return.
        let current = unsafe {
            if libc::tcgetattr(libc::STDIN_FILENO, current.as_mut_ptr()) != 0 {
                return Err(io::Error::last_os_error());
            }
            current.assume_init()
        };

        let wanted = non_canonical(current);
        // SAFETY: `wanted` is a fully initialised termios copied from the terminal.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &wanted) } != 0 {
            return Err(io::Error::last_os_error());
        }

        *SAVED.lock().unwrap_or_else(|e| e.into_inner()) = Some(current);
        Ok(())
    }

    pub(super) fn restore() -> io::Result<()> {
        let saved = SAVED.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(saved) = saved else {
            return Ok(());
        };
        // SAFETY: `saved` came from a successful tcgetattr.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &saved) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod imp {
    use std::io;

    use crossterm::terminal;

    pub(super) fn enable() -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub(super) fn restore() -> io::Result<()> {
        if terminal::is_raw_mode_enabled()? {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}
