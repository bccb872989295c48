use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::KeyInput;
use crate::kernel::services::ports::{ColorSchemeRecord, SyntaxConfigRecord};
use crate::kernel::state::FocusTarget;
use crate::kernel::syntax::SyntaxDocument;
use crate::kernel::tabs::TabId;
use crate::kernel::terminal::CommandId;

#[derive(Debug, Clone)]
pub enum Action {
    OpenPath(PathBuf),
    FileLoaded {
        path: PathBuf,
        content: String,
    },
    FileLoadFailed {
        path: PathBuf,
        error: String,
    },
    EditorKey(KeyInput),
    /// Bracketed paste: inserted verbatim, no indentation or completion.
    EditorPaste(String),
    EditorSetViewHeight {
        height: usize,
    },
    SelectTab(usize),
    NextTab,
    PrevTab,
    CloseActiveTab,
    SaveActive,
    Saved {
        tab: TabId,
        version: u64,
        success: bool,
    },
    ConfigsLoaded {
        configs: Vec<SyntaxConfigRecord>,
        schemes: Vec<ColorSchemeRecord>,
    },
    ConfigMissing {
        record: SyntaxConfigRecord,
    },
    ConfigLoadFailed {
        record: SyntaxConfigRecord,
        error: String,
    },
    /// No configuration was ever selected for the tab's file.
    NoSelectedConfig {
        tab: TabId,
    },
    ConfigResolved {
        tab: TabId,
        record: SyntaxConfigRecord,
        document: Arc<SyntaxDocument>,
    },
    ShowConfigPicker,
    HideConfigPicker,
    ConfigPickerMove(isize),
    ConfigPickerAccept,
    SetFocus(FocusTarget),
    ToggleTerminal,
    TerminalInput(char),
    TerminalBackspace,
    TerminalHistory(isize),
    TerminalSubmit,
    TerminalOutput {
        id: CommandId,
        lines: Vec<String>,
        exit_code: Option<i32>,
    },
    ExplorerSetViewHeight {
        height: usize,
    },
    ExplorerMoveSelection {
        delta: isize,
    },
    ExplorerActivate,
    DirLoaded {
        path: PathBuf,
        entries: Vec<(OsString, bool)>,
    },
    DirLoadFailed {
        path: PathBuf,
        error: String,
    },
}
