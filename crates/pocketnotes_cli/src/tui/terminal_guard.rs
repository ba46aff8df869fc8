//! Raw-mode / alternate-screen lifecycle.
//!
//! # Invariants
//! - A guard that was built successfully restores the terminal exactly once,
//!   on explicit `restore` or on drop, whichever comes first.
//! - A setup that fails halfway undoes whatever it already switched on.

use std::io;

pub trait TerminalOps {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::event::EnableMouseCapture;
        use crossterm::execute;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = self.restore();
            return Err(err);
        }
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::event::DisableMouseCapture;
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        // Every step runs even if an earlier one fails; the first error wins.
        let mut first_err = disable_raw_mode().err();
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            first_err.get_or_insert(err);
        }
        first_err.map_or(Ok(()), Err)
    }
}

pub struct TerminalGuard<O: TerminalOps = CrosstermTerminalOps> {
    ops: O,
    restored: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(CrosstermTerminalOps)
    }
}

impl<O: TerminalOps> TerminalGuard<O> {
    pub fn with_ops(ops: O) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            ops,
            restored: false,
        })
    }

    /// Restores the terminal now so the caller can report a failure.
    pub fn restore(&mut self) -> io::Result<()> {
        if std::mem::replace(&mut self.restored, true) {
            return Ok(());
        }
        self.ops.restore()
    }
}

impl<O: TerminalOps> Drop for TerminalGuard<O> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::{TerminalGuard, TerminalOps};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingOps {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_setup: bool,
    }

    impl TerminalOps for RecordingOps {
        fn setup(&self) -> io::Result<()> {
            self.calls.borrow_mut().push("setup");
            if self.fail_setup {
                return Err(io::Error::new(io::ErrorKind::Other, "no tty"));
            }
            Ok(())
        }

        fn restore(&self) -> io::Result<()> {
            self.calls.borrow_mut().push("restore");
            Ok(())
        }
    }

    #[test]
    fn drop_restores_once() {
        let ops = RecordingOps::default();
        {
            let _guard = TerminalGuard::with_ops(ops.clone()).unwrap();
        }
        assert_eq!(*ops.calls.borrow(), ["setup", "restore"]);
    }

    #[test]
    fn explicit_restore_is_not_repeated_on_drop() {
        let ops = RecordingOps::default();
        let mut guard = TerminalGuard::with_ops(ops.clone()).unwrap();
        guard.restore().unwrap();
        guard.restore().unwrap();
        drop(guard);
        assert_eq!(*ops.calls.borrow(), ["setup", "restore"]);
    }

    #[test]
    fn failed_setup_yields_no_guard() {
        let ops = RecordingOps {
            fail_setup: true,
            ..RecordingOps::default()
        };
        assert!(TerminalGuard::with_ops(ops.clone()).is_err());
        assert_eq!(*ops.calls.borrow(), ["setup"]);
    }
}
