//! Embedded terminal: a prompt whose commands run through the OS shell.
//!
//! `cd` and `clear` are handled here; every other command is handed to the runtime and its
//! output is appended to the matching entry when it arrives.

use std::path::{Path, PathBuf};

pub type CommandId = u64;

const HISTORY_LIMIT: usize = 200;
const ENTRY_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Running,
    Exited(Option<i32>),
}

#[derive(Debug, Clone)]
pub struct TerminalEntry {
    pub id: CommandId,
    pub cwd: PathBuf,
    pub command: String,
    pub output: Vec<String>,
    pub status: CommandStatus,
}

/// A command the runtime should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCommand {
    pub id: CommandId,
    pub cwd: PathBuf,
    pub command: String,
}

#[derive(Debug)]
pub struct TerminalState {
    pub entries: Vec<TerminalEntry>,
    pub cwd: PathBuf,
    pub input: String,
    history: Vec<String>,
    history_pos: Option<usize>,
    next_id: CommandId,
}

impl TerminalState {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            entries: Vec::new(),
            cwd,
            input: String::new(),
            history: Vec::new(),
            history_pos: None,
            next_id: 0,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.history_pos = None;
    }

    pub fn backspace(&mut self) -> bool {
        self.history_pos = None;
        self.input.pop().is_some()
    }

    /// Walks the command history; negative is older.
    pub fn recall(&mut self, delta: isize) -> bool {
        if self.history.is_empty() {
            return false;
        }

        let last = self.history.len() - 1;
        let next = match (self.history_pos, delta < 0) {
            (None, true) => Some(last),
            (None, false) => return false,
            (Some(pos), true) => Some(pos.saturating_sub(1)),
            (Some(pos), false) if pos >= last => None,
            (Some(pos), false) => Some(pos + 1),
        };

        self.history_pos = next;
        self.input = next
            .and_then(|i| self.history.get(i).cloned())
            .unwrap_or_default();
        true
    }

    /// Takes the prompt input. Returns the command to run in the shell, if any.
    pub fn submit(&mut self) -> Option<TerminalCommand> {
        let line = std::mem::take(&mut self.input);
        self.history_pos = None;
        let command = line.trim();
        if command.is_empty() {
            return None;
        }

        if self.history.last().map(String::as_str) != Some(command) {
            self.history.push(command.to_string());
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }

        if command == "clear" {
            self.entries.clear();
            return None;
        }

        if command == "cd" || command.starts_with("cd ") {
            let target = command[2..].trim();
            self.change_dir(command, target);
            return None;
        }

        let id = self.push_entry(command, CommandStatus::Running, Vec::new());
        Some(TerminalCommand {
            id,
            cwd: self.cwd.clone(),
            command: command.to_string(),
        })
    }

    fn change_dir(&mut self, command: &str, target: &str) {
        let dest = resolve_dir(&self.cwd, target);
        match dest.canonicalize() {
            Ok(dir) if dir.is_dir() => {
                self.push_entry(command, CommandStatus::Exited(Some(0)), Vec::new());
                self.cwd = dir;
            }
            _ => {
                let message = format!("cd: no such directory: {}", target);
                self.push_entry(command, CommandStatus::Exited(Some(1)), vec![message]);
            }
        }
    }

    fn push_entry(&mut self, command: &str, status: CommandStatus, output: Vec<String>) -> CommandId {
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push(TerminalEntry {
            id: self.next_id,
            cwd: self.cwd.clone(),
            command: command.to_string(),
            output,
            status,
        });
        if self.entries.len() > ENTRY_LIMIT {
            let excess = self.entries.len() - ENTRY_LIMIT;
            self.entries.drain(..excess);
        }
        self.next_id
    }

    /// Attaches finished output to its entry. Unknown ids are dropped.
    pub fn apply_output(&mut self, id: CommandId, lines: Vec<String>, exit_code: Option<i32>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.output.extend(lines);
        entry.status = CommandStatus::Exited(exit_code);
        true
    }

    pub fn display_dir(&self, dir: &Path) -> String {
        dir.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| dir.display().to_string())
    }
}

fn resolve_dir(cwd: &Path, target: &str) -> PathBuf {
    let home = || std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    if target.is_empty() || target == "~" {
        return home().map(PathBuf::from).unwrap_or_else(|| cwd.to_path_buf());
    }
    if let Some(rest) = target.strip_prefix("~/") {
        if let Some(home) = home() {
            return PathBuf::from(home).join(rest);
        }
    }
    cwd.join(target)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/terminal.rs"]
mod tests;
