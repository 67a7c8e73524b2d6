/// Runs a cleanup closure when dropped.
///
/// Used to restore the terminal on both normal exit and panic unwinding, so a
/// crash never leaves the shell in raw mode.
///
/// # Examples
///
/// ```
/// use rusty_guard::utils::context::ExitGuard;
///
/// let _guard = ExitGuard::with(|| println!("terminal restored"));
/// // Closure runs when _guard goes out of scope
/// ```
pub struct ExitGuard<AtExit: FnOnce()> {
    exit_cb: Option<AtExit>,
}

impl<F: FnOnce()> ExitGuard<F> {
    pub fn with(f: F) -> Self {
        Self { exit_cb: Some(f) }
    }
}

impl<F: FnOnce()> Drop for ExitGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.exit_cb.take() {
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_runs_once_on_drop() {
        let calls = Cell::new(0);
        {
            let _guard = ExitGuard::with(|| calls.set(calls.get() + 1));
            assert_eq!(calls.get(), 0);
        }
        assert_eq!(calls.get(), 1);
    }
}
