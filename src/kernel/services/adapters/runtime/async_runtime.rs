use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::shell::run_shell_command;
use crate::kernel::services::ports::{SelectedConfigRecord, SettingsRepository, SyntaxConfigRecord};
use crate::kernel::syntax::SyntaxDocument;
use crate::kernel::tabs::TabId;
use crate::kernel::terminal::TerminalCommand;
use crate::kernel::{Action, EditorError, Effect};
use crate::models::should_ignore;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<Action>,
    repo: Arc<dyn SettingsRepository>,
    shell: Option<String>,
}

impl AsyncRuntime {
    pub fn new(
        tx: Sender<Action>,
        repo: Arc<dyn SettingsRepository>,
        shell: Option<String>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            repo,
            shell,
        })
    }

    pub fn run(&self, effect: Effect) {
        tracing::trace!(?effect, "run effect");
        match effect {
            Effect::LoadFile(path) => self.load_file(path),
            Effect::LoadDir(path) => self.load_dir(path),
            Effect::LoadConfigs => self.load_configs(),
            Effect::ResolveSelectedConfig { tab, path } => self.resolve_selected_config(tab, path),
            Effect::LoadConfig { tab, record } => self.load_config(tab, record),
            Effect::PersistSelectedConfig(record) => self.persist_selected_config(record),
            Effect::DeleteConfig(id) => self.delete_config(id),
            Effect::WriteFile {
                tab,
                path,
                content,
                version,
            } => self.write_file(tab, path, content, version),
            Effect::RunTerminalCommand(command) => self.run_terminal_command(command),
        }
    }

    pub fn load_dir(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match read_dir_entries(&path).await {
                Ok(entries) => {
                    let _ = tx.send(Action::DirLoaded { path, entries });
                }
                Err(e) => {
                    let _ = tx.send(Action::DirLoadFailed {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    pub fn load_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    let _ = tx.send(Action::FileLoaded { path, content });
                }
                Err(e) => {
                    let _ = tx.send(Action::FileLoadFailed {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    pub fn write_file(&self, tab: TabId, path: PathBuf, content: String, version: u64) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let success = match tokio::fs::write(&path, content).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "write failed");
                    false
                }
            };
            let _ = tx.send(Action::Saved {
                tab,
                version,
                success,
            });
        });
    }

    /// Sends the configurations whose JSON file still exists; the rest are reported missing.
    pub fn load_configs(&self) {
        let tx = self.tx.clone();
        let repo = self.repo.clone();
        self.runtime.spawn_blocking(move || {
            let loaded = repo
                .all_configs()
                .and_then(|configs| Ok((configs, repo.color_schemes()?)));
            let (configs, schemes) = match loaded {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::error!(error = %e, "cannot read configurations");
                    return;
                }
            };

            let (present, missing): (Vec<_>, Vec<_>) =
                configs.into_iter().partition(|c| c.json_path.exists());
            let _ = tx.send(Action::ConfigsLoaded {
                configs: present,
                schemes,
            });
            for record in missing {
                let _ = tx.send(Action::ConfigMissing { record });
            }
        });
    }

    pub fn resolve_selected_config(&self, tab: TabId, path: PathBuf) {
        let tx = self.tx.clone();
        let repo = self.repo.clone();
        self.runtime.spawn_blocking(move || {
            let selected = match repo.selected_config_for(&path) {
                Ok(selected) => selected,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "cannot read selected configuration");
                    None
                }
            };
            let action = match selected {
                Some(selected) => load_syntax(tab, selected.config()),
                None => Action::NoSelectedConfig { tab },
            };
            let _ = tx.send(action);
        });
    }

    pub fn load_config(&self, tab: TabId, record: SyntaxConfigRecord) {
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let _ = tx.send(load_syntax(tab, record));
        });
    }

    pub fn persist_selected_config(&self, record: SelectedConfigRecord) {
        let repo = self.repo.clone();
        self.runtime.spawn_blocking(move || {
            if let Err(e) = repo.add_selected_config(record) {
                tracing::error!(error = %e, "cannot record selected configuration");
            }
        });
    }

    pub fn delete_config(&self, id: u64) {
        let repo = self.repo.clone();
        self.runtime.spawn_blocking(move || {
            if let Err(e) = repo.delete_config(id) {
                tracing::error!(id, error = %e, "cannot delete configuration");
            }
        });
    }

    pub fn run_terminal_command(&self, command: TerminalCommand) {
        let tx = self.tx.clone();
        let shell = self.shell.clone();
        self.runtime.spawn(async move {
            let TerminalCommand { id, cwd, command } = command;
            let (lines, exit_code) =
                match run_shell_command(shell.as_deref(), &command, &cwd).await {
                    Ok(output) => (output.lines, output.exit_code),
                    Err(e) => {
                        tracing::warn!(command = %command, error = %e, "shell command failed to start");
                        (vec![e.to_string()], None)
                    }
                };
            let _ = tx.send(Action::TerminalOutput {
                id,
                lines,
                exit_code,
            });
        });
    }
}

async fn read_dir_entries(path: &std::path::Path) -> io::Result<Vec<(OsString, bool)>> {
    let mut entries = tokio::fs::read_dir(path).await?;
    let mut result = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if should_ignore(&name.to_string_lossy()) {
            continue;
        }
        if let Ok(file_type) = entry.file_type().await {
            result.push((name, file_type.is_dir()));
        }
    }
    Ok(result)
}

fn load_syntax(tab: TabId, record: SyntaxConfigRecord) -> Action {
    match SyntaxDocument::load(&record.json_path) {
        Ok(document) => Action::ConfigResolved {
            tab,
            record,
            document: Arc::new(document),
        },
        Err(EditorError::ConfigMissing(_)) => Action::ConfigMissing { record },
        Err(e) => Action::ConfigLoadFailed {
            record,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
