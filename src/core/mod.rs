//! Shared input primitives.

pub mod event;

pub use event::{KeyCode, KeyInput, KeyPhase};
