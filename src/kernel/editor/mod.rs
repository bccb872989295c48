//! Editor domain: per-file text state, key handling and completion.

pub mod completion;
mod input;
mod key;
mod state;
pub mod text;

pub use key::{handle_key, KeyOutcome};
pub use state::EditorState;
