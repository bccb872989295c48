//! asmpad - terminal editor for assembly sources.
//!
//! Modules:
//! - core: frontend-neutral input events
//! - models: file tree and selection
//! - kernel: editor state, tabs, configurations, store/actions/effects, services
//! - tui: crossterm/ratatui frontend (feature `tui`)

pub mod core;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
