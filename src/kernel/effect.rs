use std::path::PathBuf;

use crate::kernel::services::ports::{SelectedConfigRecord, SyntaxConfigRecord};
use crate::kernel::tabs::TabId;
use crate::kernel::terminal::TerminalCommand;

/// Side effects requested by the store, executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFile(PathBuf),
    LoadDir(PathBuf),
    LoadConfigs,
    ResolveSelectedConfig {
        tab: TabId,
        path: PathBuf,
    },
    LoadConfig {
        tab: TabId,
        record: SyntaxConfigRecord,
    },
    PersistSelectedConfig(SelectedConfigRecord),
    DeleteConfig(u64),
    WriteFile {
        tab: TabId,
        path: PathBuf,
        content: String,
        version: u64,
    },
    RunTerminalCommand(TerminalCommand),
}
