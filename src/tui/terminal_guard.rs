use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;

    /// Whether the terminal sends key release events after `setup`.
    fn reports_key_release(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps {
    enhanced: AtomicBool,
}

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::{EnableBracketedPaste, KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
            execute,
            terminal::{enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen},
        };

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::SetCursorStyle::BlinkingBar
        )?;

        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced.store(true, Ordering::SeqCst);
        }
        tracing::debug!(
            key_release = self.enhanced.load(Ordering::SeqCst),
            "terminal ready"
        );
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::{DisableBracketedPaste, PopKeyboardEnhancementFlags},
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Best-effort restore: try all steps even if one fails.
        let mut first_err: Option<io::Error> = None;

        if self.enhanced.swap(false, Ordering::SeqCst) {
            if let Err(err) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                first_err.get_or_insert(err);
            }
        }
        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        if let Err(err) = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            cursor::SetCursorStyle::DefaultUserShape
        ) {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn reports_key_release(&self) -> bool {
        self.enhanced.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps::default()))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }

    pub fn reports_key_release(&self) -> bool {
        self.restorer.ops.reports_key_release()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
