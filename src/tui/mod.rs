//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the editor core has no terminal dependencies.

mod render;
pub mod terminal_guard;
pub mod theme;
pub mod workbench;

pub use terminal_guard::{CrosstermTerminalOps, TerminalGuard, TerminalOps, TerminalRestorer};
pub use theme::UiTheme;
pub use workbench::{Flow, Workbench};
