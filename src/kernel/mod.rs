//! Headless application core (state/action/effect).

pub mod action;
pub mod color;
pub mod editor;
pub mod effect;
pub mod error;
pub mod highlight;
pub mod services;
pub mod state;
pub mod store;
pub mod syntax;
pub mod tabs;
pub mod terminal;

pub use action::Action;
pub use editor::{handle_key, EditorState, KeyOutcome};
pub use effect::Effect;
pub use error::{EditorError, Result};
pub use state::{AppState, ConfigPickerState, ExplorerState, FocusTarget, UiState};
pub use store::{DispatchResult, Store};
pub use syntax::SyntaxDocument;
pub use tabs::{TabId, TabModel, TabsEvent, TabsState};
pub use terminal::{CommandStatus, TerminalCommand, TerminalState};
